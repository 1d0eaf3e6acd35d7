use anyhow::{Context, Result};
use boid_core::{AgentId, Flock, FlockParameters, InvalidParameter, Vector2D, WorldBounds};
use boid_shared::{AgentSnapshot, Position, SettingsUpdate, SpawnRequest, StatusResponse};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::VecDeque;
use std::io::Write;

use crate::config::{apply_settings, settings_of, ScheduledSettings, ScheduledSpawn, SimConfig};

/// Most agents the simulator can hold.
pub const POPULATION_CAPACITY: usize = 1024;

/// One line of simulator output
#[derive(Debug, Clone, Serialize)]
pub struct SimFrame {
    pub status: StatusResponse,
    pub agents: Vec<AgentSnapshot>,
}

/// A flock plus the host-side events scheduled against it.
pub struct Simulation {
    flock: Flock<POPULATION_CAPACITY>,
    rng: StdRng,
    delta_time: f32,
    spawns: VecDeque<ScheduledSpawn>,
    settings_changes: VecDeque<ScheduledSettings>,
}

impl Simulation {
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;

        let world = WorldBounds::new(
            Vector2D::new(config.world.min.x, config.world.min.y),
            Vector2D::new(config.world.max.x, config.world.max.y),
        )
        .context("Invalid world bounds")?;

        let mut params = FlockParameters::default();
        apply_settings(&mut params, &config.settings).context("Invalid flock settings")?;

        let mut flock = Flock::with_max_population(world, params, config.max_population)
            .context("Invalid population cap")?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let spawned = flock.populate(config.initial_population, &mut rng);
        log::info!(
            "Spawned {} of {} initial agents (cap {})",
            spawned,
            config.initial_population,
            config.max_population
        );

        let mut spawns: Vec<ScheduledSpawn> = config.spawns.clone();
        spawns.sort_by_key(|spawn| spawn.step);
        let mut settings_changes: Vec<ScheduledSettings> = config.settings_changes.clone();
        settings_changes.sort_by_key(|change| change.step);

        Ok(Self {
            flock,
            rng,
            delta_time: config.delta_time,
            spawns: spawns.into(),
            settings_changes: settings_changes.into(),
        })
    }

    pub fn flock(&self) -> &Flock<POPULATION_CAPACITY> {
        &self.flock
    }

    /// Adds an agent; a full flock is reported and otherwise ignored.
    pub fn handle_spawn(&mut self, request: SpawnRequest) -> Option<AgentId> {
        let normalized = Vector2D::new(request.position.x, request.position.y);
        match self.flock.spawn_with_rng(normalized, &mut self.rng) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("Spawn at {:?} dropped: {}", request.position, e);
                None
            }
        }
    }

    /// Applies a settings update; on error the previous settings stay active.
    pub fn handle_settings(&mut self, update: &SettingsUpdate) -> Result<(), InvalidParameter> {
        apply_settings(self.flock.params_mut(), &update.settings)
    }

    /// Runs the events scheduled for this boundary, then one tick.
    pub fn step(&mut self) -> Result<()> {
        let tick = self.flock.tick_count();

        while self.spawns.front().is_some_and(|spawn| spawn.step <= tick) {
            if let Some(spawn) = self.spawns.pop_front() {
                self.handle_spawn(SpawnRequest {
                    position: spawn.position,
                });
            }
        }

        while self
            .settings_changes
            .front()
            .is_some_and(|change| change.step <= tick)
        {
            if let Some(change) = self.settings_changes.pop_front() {
                let update = SettingsUpdate {
                    settings: change
                        .settings
                        .merged_over(&settings_of(self.flock.params())),
                };
                match self.handle_settings(&update) {
                    Ok(()) => log::info!("Applied settings change at tick {}", tick),
                    Err(e) => log::warn!("Settings change at tick {} rejected: {}", tick, e),
                }
            }
        }

        self.flock
            .step(self.delta_time)
            .with_context(|| format!("Tick {} failed", tick))
    }

    /// Runs `steps` ticks, writing a JSON frame every `snapshot_every` ticks
    /// and always after the last one.
    pub fn run<W: Write>(
        &mut self,
        steps: u64,
        snapshot_every: Option<u64>,
        out: &mut W,
    ) -> Result<()> {
        for done in 1..=steps {
            self.step()?;

            let tick = self.flock.tick_count();
            if done != steps && snapshot_every.is_some_and(|every| tick % every == 0) {
                self.write_frame(out)?;
            }
        }
        self.write_frame(out)?;

        let pending = self.spawns.len() + self.settings_changes.len();
        if pending > 0 {
            log::warn!("{} scheduled events were past the last tick and never ran", pending);
        }
        Ok(())
    }

    pub fn status(&self) -> StatusResponse {
        StatusResponse {
            boid_count: self.flock.len(),
            max_population: self.flock.max_population(),
            tick: self.flock.tick_count(),
        }
    }

    pub fn snapshot(&self) -> Vec<AgentSnapshot> {
        self.flock
            .agents()
            .iter()
            .map(|agent| AgentSnapshot {
                id: agent.id().0,
                position: Position::new(agent.position().x, agent.position().y),
                heading_degrees: agent.heading().to_degrees(),
            })
            .collect()
    }

    pub fn frame(&self) -> SimFrame {
        SimFrame {
            status: self.status(),
            agents: self.snapshot(),
        }
    }

    fn write_frame<W: Write>(&self, out: &mut W) -> Result<()> {
        let frame = self.frame();
        log::debug!(
            "Tick {}: {} agents",
            frame.status.tick,
            frame.status.boid_count
        );
        serde_json::to_writer(&mut *out, &frame).context("Failed to serialize frame")?;
        writeln!(out).context("Failed to write frame")?;
        Ok(())
    }
}
