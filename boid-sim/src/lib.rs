//! Headless host for the boid flock: loads a JSON scenario, drives the
//! simulation tick by tick and writes JSON frames.

pub mod config;
pub mod runner;

pub use config::{apply_settings, SimConfig};
pub use runner::{SimFrame, Simulation, POPULATION_CAPACITY};
