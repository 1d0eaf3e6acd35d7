//! The three flocking forces.
//!
//! Each function takes the agent, the neighbours its sensor reported this
//! tick and the flock parameters, and returns a raw (unweighted, unnormalised)
//! steering vector. With no neighbours all three return the zero vector.

use crate::agent::Agent;
use crate::params::FlockParameters;
use crate::vector::Vector2D;

/// Distances below this are treated as this when scaling separation.
pub const MIN_SEPARATION_DISTANCE: f32 = 1e-4;

/// Repulsion away from every neighbour.
///
/// Each neighbour contributes `(self - other) * max_accel * (range - d) / d`,
/// which is strongest up close and fades to nothing at `sensor_range`.
pub fn separation(agent: &Agent, neighbors: &[&Agent], params: &FlockParameters) -> Vector2D {
    let mut steering = Vector2D::zero();

    for other in neighbors {
        let away = agent.position() - other.position();
        let mut distance = away.magnitude();
        if distance < MIN_SEPARATION_DISTANCE {
            log::trace!(
                "agents {} and {} overlap, clamping separation distance",
                agent.id(),
                other.id()
            );
            distance = MIN_SEPARATION_DISTANCE;
        }

        let falloff = (params.sensor_range() - distance).max(0.0);
        let strength = params.max_separation_accel() * falloff / distance;
        steering += away * strength;
    }

    steering
}

/// Average forward direction of the neighbours, seeded with the agent's own.
///
/// The sum includes the agent's forward vector but is divided by the
/// neighbour count only.
pub fn alignment(agent: &Agent, neighbors: &[&Agent], _params: &FlockParameters) -> Vector2D {
    if neighbors.is_empty() {
        return Vector2D::zero();
    }

    let mut sum = agent.forward();
    for other in neighbors {
        sum += other.forward();
    }

    sum / neighbors.len() as f32
}

/// Vector from the agent to the centroid of its neighbours.
pub fn cohesion(agent: &Agent, neighbors: &[&Agent], _params: &FlockParameters) -> Vector2D {
    if neighbors.is_empty() {
        return Vector2D::zero();
    }

    let mut sum = Vector2D::zero();
    for other in neighbors {
        sum += other.position();
    }

    sum / neighbors.len() as f32 - agent.position()
}
