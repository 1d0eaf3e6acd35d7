#![cfg_attr(not(feature = "std"), no_std)]

use serde::{Deserialize, Serialize};

/// A 2D position, either normalised `[0, 1]` viewport space or world units
/// depending on the message carrying it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another position
    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        libm::sqrtf(dx * dx + dy * dy)
    }
}

/// Read-only view of one agent, for rendering hosts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentSnapshot {
    pub id: u64,
    /// World units
    pub position: Position,
    /// Degrees counter-clockwise from the up axis
    pub heading_degrees: f32,
}

/// Flock tuning values as exchanged with hosts and stored in config files.
///
/// Missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoidSettings {
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub sensor_ray_count: usize,
    pub sensor_cone_degrees: f32,
    pub sensor_range: f32,
    pub max_separation_accel: f32,
    pub move_speed: f32,
    pub rotation_speed: f32,
    pub agent_radius: f32,
}

impl Default for BoidSettings {
    fn default() -> Self {
        Self {
            separation_weight: 0.5,
            alignment_weight: 0.5,
            cohesion_weight: 0.5,
            sensor_ray_count: 10,
            sensor_cone_degrees: 270.0,
            sensor_range: 2.0,
            max_separation_accel: 15.0,
            move_speed: 5.0,
            rotation_speed: 360.0,
            agent_radius: 0.15,
        }
    }
}

/// A change to some of the flock settings.
///
/// Fields left out keep whatever value is in force when the change lands.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SettingsPatch {
    pub separation_weight: Option<f32>,
    pub alignment_weight: Option<f32>,
    pub cohesion_weight: Option<f32>,
    pub sensor_ray_count: Option<usize>,
    pub sensor_cone_degrees: Option<f32>,
    pub sensor_range: Option<f32>,
    pub max_separation_accel: Option<f32>,
    pub move_speed: Option<f32>,
    pub rotation_speed: Option<f32>,
    pub agent_radius: Option<f32>,
}

impl SettingsPatch {
    /// `current` with the fields this patch sets replaced.
    pub fn merged_over(&self, current: &BoidSettings) -> BoidSettings {
        BoidSettings {
            separation_weight: self.separation_weight.unwrap_or(current.separation_weight),
            alignment_weight: self.alignment_weight.unwrap_or(current.alignment_weight),
            cohesion_weight: self.cohesion_weight.unwrap_or(current.cohesion_weight),
            sensor_ray_count: self.sensor_ray_count.unwrap_or(current.sensor_ray_count),
            sensor_cone_degrees: self
                .sensor_cone_degrees
                .unwrap_or(current.sensor_cone_degrees),
            sensor_range: self.sensor_range.unwrap_or(current.sensor_range),
            max_separation_accel: self
                .max_separation_accel
                .unwrap_or(current.max_separation_accel),
            move_speed: self.move_speed.unwrap_or(current.move_speed),
            rotation_speed: self.rotation_speed.unwrap_or(current.rotation_speed),
            agent_radius: self.agent_radius.unwrap_or(current.agent_radius),
        }
    }
}

/// Settings update message sent from a tuning panel to the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub settings: BoidSettings,
}

/// Request to add an agent at a normalised position
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpawnRequest {
    pub position: Position,
}

/// Status of a running simulation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub boid_count: usize,
    pub max_population: usize,
    pub tick: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_distance() {
        let p1 = Position::new(0.0, 0.0);
        let p2 = Position::new(3.0, 4.0);
        assert_eq!(p1.distance_to(&p2), 5.0);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings: BoidSettings =
            serde_json::from_str(r#"{"cohesion_weight": 0.9, "sensor_ray_count": 24}"#).unwrap();
        assert_eq!(settings.cohesion_weight, 0.9);
        assert_eq!(settings.sensor_ray_count, 24);
        assert_eq!(settings.move_speed, BoidSettings::default().move_speed);
    }

    #[test]
    fn test_patch_keeps_untouched_fields() {
        let current = BoidSettings {
            separation_weight: 0.6,
            cohesion_weight: 0.4,
            ..BoidSettings::default()
        };
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"move_speed": 8.0, "rotation_speed": 540.0}"#).unwrap();

        let merged = patch.merged_over(&current);
        assert_eq!(merged.move_speed, 8.0);
        assert_eq!(merged.rotation_speed, 540.0);
        assert_eq!(merged.separation_weight, 0.6);
        assert_eq!(merged.cohesion_weight, 0.4);
        assert_eq!(merged.sensor_ray_count, current.sensor_ray_count);
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let current = BoidSettings {
            agent_radius: 0.4,
            ..BoidSettings::default()
        };
        assert_eq!(SettingsPatch::default().merged_over(&current), current);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = AgentSnapshot {
            id: 3,
            position: Position::new(1.5, -2.0),
            heading_degrees: 90.0,
        };
        let value = serde_json::to_value(snapshot).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["position"]["x"], 1.5);
        assert_eq!(value["heading_degrees"], 90.0);
    }
}
