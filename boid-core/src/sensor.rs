//! Neighbour detection through a cone of sensor rays.
//!
//! An agent casts `sensor_ray_count` rays spread evenly across its sensing
//! cone. Each ray reports the nearest few agents whose bodies it crosses
//! within `sensor_range`. An agent crossed by several rays is reported once
//! per ray, which gives it more weight in the averaged forces.
//!
//! Proximity does not wrap around the world edges.

use crate::agent::Agent;
use crate::params::{FlockParameters, MAX_RAY_COUNT};
use crate::vector::{sqrt, Vector2D};

/// Most agents a single ray reports.
pub const MAX_HITS_PER_RAY: usize = 2;
/// Upper bound on the neighbours one query can return.
pub const MAX_NEIGHBORS: usize = MAX_RAY_COUNT * MAX_HITS_PER_RAY;

/// Neighbours seen by one agent during one tick, duplicates included.
pub type Neighbors<'a> = heapless::Vec<&'a Agent, MAX_NEIGHBORS>;

/// A ray segment cast by an agent's sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorRay {
    pub origin: Vector2D,
    /// Unit direction of the ray.
    pub direction: Vector2D,
    pub length: f32,
}

impl SensorRay {
    pub fn end(&self) -> Vector2D {
        self.origin + self.direction * self.length
    }

    /// Distance along the ray at which it enters a circle, if it does.
    ///
    /// A circle that already contains the origin is hit at distance `0`.
    pub fn hit_distance(&self, center: Vector2D, radius: f32) -> Option<f32> {
        let to_center = center - self.origin;
        let along = to_center.dot(&self.direction);

        let closest = self.origin + self.direction * along.clamp(0.0, self.length);
        let radius_sq = radius * radius;
        if (center - closest).magnitude_squared() > radius_sq {
            return None;
        }

        let off_axis_sq = to_center.magnitude_squared() - along * along;
        let half_chord = sqrt((radius_sq - off_axis_sq).max(0.0));
        Some((along - half_chord).max(0.0))
    }
}

/// The rays an agent casts, from `heading - cone/2` counter-clockwise in
/// steps of `cone / sensor_ray_count`.
///
/// A zero-degree cone gives `sensor_ray_count` identical forward rays.
pub fn rays(agent: &Agent, params: &FlockParameters) -> impl Iterator<Item = SensorRay> {
    let cone = params.sensor_cone_degrees().to_radians();
    let count = params.sensor_ray_count();
    let step = cone / count as f32;
    let start = agent.heading() - cone / 2.0;
    let origin = agent.position();
    let length = params.sensor_range();

    (0..count).map(move |i| SensorRay {
        origin,
        direction: Vector2D::from_heading(start + step * i as f32),
        length,
    })
}

/// Finds the agents of `all_agents` that `agent`'s sensor rays cross.
///
/// The agent itself (matched by id) is never reported.
pub fn find_neighbors<'a>(
    agent: &Agent,
    all_agents: &'a [Agent],
    params: &FlockParameters,
) -> Neighbors<'a> {
    let mut neighbors = Neighbors::new();
    let radius = params.agent_radius();

    for ray in rays(agent, params).take(MAX_RAY_COUNT) {
        let mut hits = heapless::Vec::<(f32, &'a Agent), MAX_HITS_PER_RAY>::new();

        for other in all_agents.iter().filter(|other| other.id() != agent.id()) {
            if let Some(distance) = ray.hit_distance(other.position(), radius) {
                keep_nearest(&mut hits, distance, other);
            }
        }

        hits.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));
        for (_, other) in hits {
            // rays * hits per ray never exceeds MAX_NEIGHBORS
            let _ = neighbors.push(other);
        }
    }

    neighbors
}

fn keep_nearest<'a>(
    hits: &mut heapless::Vec<(f32, &'a Agent), MAX_HITS_PER_RAY>,
    distance: f32,
    agent: &'a Agent,
) {
    if hits.push((distance, agent)).is_ok() {
        return;
    }

    let farthest = hits
        .iter()
        .enumerate()
        .max_by(|a, b| a.1 .0.total_cmp(&b.1 .0))
        .map(|(index, hit)| (index, hit.0));

    if let Some((index, far)) = farthest {
        if distance < far {
            hits[index] = (distance, agent);
        }
    }
}
