//! Rectangular world the flock lives in.
//!
//! Positions are stored in world units. The rectangle maps onto a normalised
//! `[0, 1] x [0, 1]` space which is what hosts use to place agents (a viewport
//! coordinate, for example) and what the wrap rule is defined against.

use crate::error::{InvalidParameter, Parameter};
use crate::vector::Vector2D;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    min: Vector2D,
    max: Vector2D,
}

impl WorldBounds {
    /// Creates bounds from two opposite corners.
    ///
    /// Fails when the rectangle is empty or any coordinate is not finite.
    pub fn new(min: Vector2D, max: Vector2D) -> Result<Self, InvalidParameter> {
        if !min.is_finite() || !max.is_finite() {
            return Err(InvalidParameter::new(Parameter::WorldBounds, f32::NAN));
        }
        if max.x <= min.x {
            return Err(InvalidParameter::new(Parameter::WorldBounds, max.x - min.x));
        }
        if max.y <= min.y {
            return Err(InvalidParameter::new(Parameter::WorldBounds, max.y - min.y));
        }
        Ok(Self { min, max })
    }

    /// Bounds of the given size centred on the origin.
    pub fn centered(width: f32, height: f32) -> Result<Self, InvalidParameter> {
        let half = Vector2D::new(width / 2.0, height / 2.0);
        Self::new(-half, half)
    }

    pub fn min(&self) -> Vector2D {
        self.min
    }

    pub fn max(&self) -> Vector2D {
        self.max
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn to_normalized(&self, position: Vector2D) -> Vector2D {
        Vector2D::new(
            (position.x - self.min.x) / self.width(),
            (position.y - self.min.y) / self.height(),
        )
    }

    pub fn to_world(&self, normalized: Vector2D) -> Vector2D {
        Vector2D::new(
            self.min.x + normalized.x * self.width(),
            self.min.y + normalized.y * self.height(),
        )
    }

    /// True when `position` lies inside the rectangle, edges included.
    pub fn contains(&self, position: Vector2D) -> bool {
        let n = self.to_normalized(position);
        (0.0..=1.0).contains(&n.x) && (0.0..=1.0).contains(&n.y)
    }

    /// Teleports a world position that left the rectangle to the opposite edge.
    ///
    /// Coordinates already inside (including exactly on an edge) are returned
    /// untouched. A wrapped coordinate is set to the exact edge value instead of
    /// being mapped back through the normalised space.
    pub fn wrap(&self, position: Vector2D) -> Vector2D {
        let n = self.to_normalized(position);
        Vector2D::new(
            wrap_axis(position.x, n.x, self.min.x, self.max.x),
            wrap_axis(position.y, n.y, self.min.y, self.max.y),
        )
    }

    /// The wrap rule applied directly in normalised space.
    pub fn wrap_normalized(normalized: Vector2D) -> Vector2D {
        Vector2D::new(
            wrap_axis(normalized.x, normalized.x, 0.0, 1.0),
            wrap_axis(normalized.y, normalized.y, 0.0, 1.0),
        )
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min: Vector2D::new(-8.0, -5.0),
            max: Vector2D::new(8.0, 5.0),
        }
    }
}

fn wrap_axis(value: f32, normalized: f32, low: f32, high: f32) -> f32 {
    if normalized > 1.0 {
        low
    } else if normalized < 0.0 {
        high
    } else if normalized.is_nan() {
        // never let a NaN escape the world; park it on the low edge
        low
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_normalized_scenarios() {
        let past_right = WorldBounds::wrap_normalized(Vector2D::new(1.02, 0.5));
        assert_eq!(past_right, Vector2D::new(0.0, 0.5));

        let below_bottom = WorldBounds::wrap_normalized(Vector2D::new(0.5, -0.01));
        assert_eq!(below_bottom, Vector2D::new(0.5, 1.0));

        let corner = WorldBounds::wrap_normalized(Vector2D::new(1.0, 0.0));
        assert_eq!(corner, Vector2D::new(1.0, 0.0));
    }

    #[test]
    fn test_wrap_world_position() {
        let world = WorldBounds::centered(16.0, 10.0).unwrap();

        assert_eq!(world.wrap(Vector2D::new(8.5, 1.0)), Vector2D::new(-8.0, 1.0));
        assert_eq!(world.wrap(Vector2D::new(-8.5, 1.0)), Vector2D::new(8.0, 1.0));
        assert_eq!(world.wrap(Vector2D::new(2.0, 5.1)), Vector2D::new(2.0, -5.0));
        assert_eq!(world.wrap(Vector2D::new(2.0, -5.1)), Vector2D::new(2.0, 5.0));
        assert_eq!(world.wrap(Vector2D::new(8.0, -5.0)), Vector2D::new(8.0, -5.0));
    }

    #[test]
    fn test_wrapped_edges_normalize_inside_unit_square() {
        let world = WorldBounds::new(Vector2D::new(-3.3, 0.7), Vector2D::new(11.9, 4.1)).unwrap();
        for point in [
            Vector2D::new(100.0, 2.0),
            Vector2D::new(-100.0, 2.0),
            Vector2D::new(0.0, 100.0),
            Vector2D::new(0.0, -100.0),
        ] {
            let n = world.to_normalized(world.wrap(point));
            assert!((0.0..=1.0).contains(&n.x), "x out of range: {n:?}");
            assert!((0.0..=1.0).contains(&n.y), "y out of range: {n:?}");
        }
    }

    #[test]
    fn test_normalized_round_trip_of_corners() {
        let world = WorldBounds::default();
        assert_eq!(world.to_world(Vector2D::new(0.0, 0.0)), world.min());
        assert_eq!(world.to_world(Vector2D::new(1.0, 1.0)), world.max());
        assert_eq!(world.to_normalized(world.max()), Vector2D::new(1.0, 1.0));
    }

    #[test]
    fn test_rejects_empty_rectangle() {
        assert!(WorldBounds::centered(0.0, 10.0).is_err());
        assert!(WorldBounds::new(Vector2D::new(1.0, 1.0), Vector2D::new(0.0, 2.0)).is_err());
        assert!(WorldBounds::new(Vector2D::new(f32::NAN, 0.0), Vector2D::new(1.0, 1.0)).is_err());
    }
}
