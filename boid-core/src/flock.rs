use crate::agent::{Agent, AgentId};
use crate::error::{CapacityExceeded, InvalidParameter, Parameter};
use crate::params::FlockParameters;
use crate::vector::Vector2D;
use crate::world::WorldBounds;

#[cfg(feature = "std")]
use rand::Rng;

/// Owns the live agents and advances them together.
///
/// Storage is fixed at `N` agents so the flock works without an allocator.
/// Updates are double-buffered: during [`Flock::step`] every agent reads the
/// population as it was when the tick started.
pub struct Flock<const N: usize> {
    agents: heapless::Vec<Agent, N>,
    next: heapless::Vec<Agent, N>,
    params: FlockParameters,
    world: WorldBounds,
    max_population: usize,
    next_id: u64,
    tick: u64,
}

impl<const N: usize> Flock<N> {
    /// An empty flock whose population cap is its storage capacity `N`.
    pub fn new(world: WorldBounds, params: FlockParameters) -> Self {
        Self {
            agents: heapless::Vec::new(),
            next: heapless::Vec::new(),
            params,
            world,
            max_population: N,
            next_id: 0,
            tick: 0,
        }
    }

    /// An empty flock capped below its storage capacity.
    pub fn with_max_population(
        world: WorldBounds,
        params: FlockParameters,
        max_population: usize,
    ) -> Result<Self, InvalidParameter> {
        if max_population > N {
            return Err(InvalidParameter::new(
                Parameter::MaxPopulation,
                max_population as f32,
            ));
        }
        let mut flock = Self::new(world, params);
        flock.max_population = max_population;
        Ok(flock)
    }

    /// Adds an agent at a normalised position with the given heading (radians).
    ///
    /// Positions outside `[0, 1]` are wrapped like any agent leaving the world.
    pub fn spawn_with_heading(
        &mut self,
        normalized: Vector2D,
        heading: f32,
    ) -> Result<AgentId, CapacityExceeded> {
        if self.agents.len() >= self.max_population {
            log::debug!(
                "Spawn at {:?} rejected, population at cap of {}",
                normalized,
                self.max_population
            );
            return Err(CapacityExceeded {
                max_population: self.max_population,
            });
        }

        let id = AgentId(self.next_id);
        let position = self.world.wrap(self.world.to_world(normalized));
        let agent = Agent::new(id, position, heading);

        if self.agents.push(agent).is_err() {
            return Err(CapacityExceeded {
                max_population: self.max_population,
            });
        }
        self.next_id += 1;

        log::debug!("Spawned agent {} at {:?}", id, position);
        Ok(id)
    }

    /// Adds an agent facing a random direction.
    #[cfg(feature = "std")]
    pub fn spawn(&mut self, normalized: Vector2D) -> Result<AgentId, CapacityExceeded> {
        self.spawn_with_rng(normalized, &mut rand::thread_rng())
    }

    /// Adds an agent whose heading is drawn from `rng`.
    #[cfg(feature = "std")]
    pub fn spawn_with_rng<R: Rng>(
        &mut self,
        normalized: Vector2D,
        rng: &mut R,
    ) -> Result<AgentId, CapacityExceeded> {
        let heading = rng.gen_range(0.0..core::f32::consts::TAU);
        self.spawn_with_heading(normalized, heading)
    }

    /// Adds an agent at a random spot facing a random direction.
    #[cfg(feature = "std")]
    pub fn spawn_random<R: Rng>(
        &mut self,
        rng: &mut R,
    ) -> Result<AgentId, CapacityExceeded> {
        let normalized = Vector2D::new(rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0));
        self.spawn_with_rng(normalized, rng)
    }

    /// Spawns up to `count` random agents, stopping at the population cap.
    ///
    /// Returns how many were added.
    #[cfg(feature = "std")]
    pub fn populate<R: Rng>(&mut self, count: usize, rng: &mut R) -> usize {
        let mut spawned = 0;
        while spawned < count && self.spawn_random(rng).is_ok() {
            spawned += 1;
        }
        if spawned < count {
            log::warn!(
                "Requested {} agents but only {} fit under the cap of {}",
                count,
                spawned,
                self.max_population
            );
        }
        spawned
    }

    /// Removes an agent. Its id is not handed out again.
    pub fn despawn(&mut self, id: AgentId) -> Option<Agent> {
        let index = self.agents.iter().position(|agent| agent.id() == id)?;
        Some(self.agents.remove(index))
    }

    /// Advances every agent by `delta_time` seconds.
    ///
    /// Each agent senses and steers against the start-of-tick population;
    /// results are written to a second buffer that replaces the first once
    /// all agents are done.
    pub fn step(&mut self, delta_time: f32) -> Result<(), InvalidParameter> {
        if !delta_time.is_finite() || delta_time < 0.0 {
            return Err(InvalidParameter::new(Parameter::DeltaTime, delta_time));
        }

        self.next.clear();
        for agent in self.agents.iter() {
            let advanced = agent.advance(&self.agents, &self.params, &self.world, delta_time);
            // both buffers share capacity N
            let _ = self.next.push(advanced);
        }
        core::mem::swap(&mut self.agents, &mut self.next);
        self.tick += 1;

        log::trace!("Tick {} advanced {} agents", self.tick, self.agents.len());
        Ok(())
    }

    /// Read-only view of the live agents.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id() == id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn max_population(&self) -> usize {
        self.max_population
    }

    /// Number of completed ticks.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn params(&self) -> &FlockParameters {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut FlockParameters {
        &mut self.params
    }

    pub fn world(&self) -> &WorldBounds {
        &self.world
    }

    /// Replaces the world rectangle and wraps agents left outside it.
    pub fn set_world(&mut self, world: WorldBounds) {
        self.world = world;
        for agent in self.agents.iter_mut() {
            let wrapped = world.wrap(agent.position());
            if wrapped != agent.position() {
                *agent = Agent::new(agent.id(), wrapped, agent.heading());
            }
        }
    }
}
