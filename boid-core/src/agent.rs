use core::fmt;

use crate::behavior;
use crate::params::FlockParameters;
use crate::sensor;
use crate::vector::{wrap_signed_angle, wrap_unsigned_angle, Vector2D};
use crate::world::WorldBounds;

/// Identifier handed out at spawn. Never reused by the flock that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single boid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    id: AgentId,
    position: Vector2D,
    heading: f32,
}

/// The weighted steering contributions behind one update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    pub separation: Vector2D,
    pub alignment: Vector2D,
    pub cohesion: Vector2D,
    /// Unit direction the agent turns toward.
    pub desired: Vector2D,
    /// Sensor hits, duplicates included.
    pub neighbor_count: usize,
}

impl Agent {
    /// Creates an agent; `heading` is in radians from the up axis.
    pub fn new(id: AgentId, position: Vector2D, heading: f32) -> Self {
        Self {
            id,
            position,
            heading: wrap_unsigned_angle(heading),
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    /// Heading in radians, within `[0, 2π)`.
    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn forward(&self) -> Vector2D {
        Vector2D::from_heading(self.heading)
    }

    /// Turns from the current heading toward `target` along the shorter way
    /// round, by at most `max_step` radians. Never overshoots the target.
    pub fn rotate_towards(&self, target: f32, max_step: f32) -> f32 {
        let max_step = if max_step.is_finite() { max_step.max(0.0) } else { 0.0 };
        let difference = wrap_signed_angle(target - self.heading);
        wrap_unsigned_angle(self.heading + difference.clamp(-max_step, max_step))
    }

    /// Senses neighbours in `snapshot` and blends the three flocking forces
    /// with the current forward direction.
    pub fn steering(&self, snapshot: &[Agent], params: &FlockParameters) -> Steering {
        let forward = self.forward();
        let neighbors = sensor::find_neighbors(self, snapshot, params);

        let separation = behavior::separation(self, &neighbors, params).normalize()
            * params.separation_weight();
        let alignment =
            behavior::alignment(self, &neighbors, params).normalize() * params.alignment_weight();
        let cohesion =
            behavior::cohesion(self, &neighbors, params).normalize() * params.cohesion_weight();

        let mut desired = (forward + separation + alignment + cohesion).normalize();
        if desired.is_zero() {
            // forces cancelled out exactly; keep flying straight
            desired = forward;
        }

        Steering {
            separation,
            alignment,
            cohesion,
            desired,
            neighbor_count: neighbors.len(),
        }
    }

    /// Computes this agent's state one tick later.
    ///
    /// `snapshot` is the whole population as it was at the start of the tick,
    /// `self` included. The receiver is left untouched so every agent of a
    /// tick can read the same snapshot.
    pub fn advance(
        &self,
        snapshot: &[Agent],
        params: &FlockParameters,
        world: &WorldBounds,
        delta_time: f32,
    ) -> Agent {
        let steering = self.steering(snapshot, params);

        let max_turn = params.rotation_speed().to_radians() * delta_time;
        let heading = self.rotate_towards(steering.desired.to_heading(), max_turn);

        let velocity = Vector2D::from_heading(heading) * params.move_speed();
        let position = world.wrap(self.position + velocity * delta_time);

        Agent {
            id: self.id,
            position,
            heading,
        }
    }
}
