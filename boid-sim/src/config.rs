//! Scenario files for the headless simulator.
//!
//! A scenario is a JSON document; every field is optional.
//!
//! ```json
//! {
//!   "world": { "min": { "x": -8.0, "y": -5.0 }, "max": { "x": 8.0, "y": 5.0 } },
//!   "max_population": 200,
//!   "initial_population": 60,
//!   "delta_time": 0.02,
//!   "steps": 500,
//!   "seed": 7,
//!   "settings": { "cohesion_weight": 0.8 },
//!   "spawns": [{ "step": 100, "position": { "x": 0.5, "y": 0.5 } }],
//!   "settings_changes": [{ "step": 250, "settings": { "move_speed": 8.0 } }]
//! }
//! ```

use anyhow::{bail, Context, Result};
use boid_core::{FlockParameters, InvalidParameter};
use boid_shared::{BoidSettings, Position, SettingsPatch};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::runner::POPULATION_CAPACITY;

/// World rectangle in world units
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WorldConfig {
    pub min: Position,
    pub max: Position,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            min: Position::new(-8.0, -5.0),
            max: Position::new(8.0, 5.0),
        }
    }
}

/// Agent added at the boundary before tick `step` runs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScheduledSpawn {
    pub step: u64,
    /// Normalised `[0, 1]` position
    pub position: Position,
}

/// Settings changed at the boundary before tick `step` runs.
///
/// Only the fields present change; the rest keep the values in force.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledSettings {
    pub step: u64,
    pub settings: SettingsPatch,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub max_population: usize,
    pub initial_population: usize,
    /// Seconds per tick
    pub delta_time: f32,
    pub steps: u64,
    /// Seed for spawn positions and headings; random when absent
    pub seed: Option<u64>,
    /// Emit a frame every this many ticks; only the final frame when absent
    pub snapshot_every: Option<u64>,
    pub settings: BoidSettings,
    pub spawns: Vec<ScheduledSpawn>,
    pub settings_changes: Vec<ScheduledSettings>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            max_population: 200,
            initial_population: 50,
            delta_time: 0.02,
            steps: 500,
            seed: None,
            snapshot_every: None,
            settings: BoidSettings::default(),
            spawns: Vec::new(),
            settings_changes: Vec::new(),
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json).context("Malformed scenario JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid scenario file {}", path.display()))
    }

    /// Checks the values the core does not validate itself.
    pub fn validate(&self) -> Result<()> {
        if self.max_population > POPULATION_CAPACITY {
            bail!(
                "max_population {} exceeds the simulator capacity of {}",
                self.max_population,
                POPULATION_CAPACITY
            );
        }
        if !self.delta_time.is_finite() || self.delta_time <= 0.0 {
            bail!("delta_time must be a positive number of seconds, got {}", self.delta_time);
        }
        if self.snapshot_every == Some(0) {
            bail!("snapshot_every must be at least 1");
        }
        if self.initial_population > self.max_population {
            log::warn!(
                "initial_population {} is above max_population {}; the extra agents will not spawn",
                self.initial_population,
                self.max_population
            );
        }
        Ok(())
    }
}

/// Writes every value of `settings` into `params`.
///
/// All values are checked before any is committed: on error `params` is
/// left exactly as it was.
pub fn apply_settings(
    params: &mut FlockParameters,
    settings: &BoidSettings,
) -> Result<(), InvalidParameter> {
    let mut candidate = params.clone();
    candidate.set_separation_weight(settings.separation_weight)?;
    candidate.set_alignment_weight(settings.alignment_weight)?;
    candidate.set_cohesion_weight(settings.cohesion_weight)?;
    candidate.set_sensor_ray_count(settings.sensor_ray_count)?;
    candidate.set_sensor_cone_degrees(settings.sensor_cone_degrees)?;
    candidate.set_sensor_range(settings.sensor_range)?;
    candidate.set_max_separation_accel(settings.max_separation_accel)?;
    candidate.set_move_speed(settings.move_speed)?;
    candidate.set_rotation_speed(settings.rotation_speed)?;
    candidate.set_agent_radius(settings.agent_radius)?;
    *params = candidate;
    Ok(())
}

/// The settings message matching `params`.
pub fn settings_of(params: &FlockParameters) -> BoidSettings {
    BoidSettings {
        separation_weight: params.separation_weight(),
        alignment_weight: params.alignment_weight(),
        cohesion_weight: params.cohesion_weight(),
        sensor_ray_count: params.sensor_ray_count(),
        sensor_cone_degrees: params.sensor_cone_degrees(),
        sensor_range: params.sensor_range(),
        max_separation_accel: params.max_separation_accel(),
        move_speed: params.move_speed(),
        rotation_speed: params.rotation_speed(),
        agent_radius: params.agent_radius(),
    }
}
