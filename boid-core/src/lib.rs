//! Cone-sensing boid flock.
//!
//! Agents fly at constant speed on a 2D plane and steer from what their
//! sensor rays see: separation from close neighbours, alignment with their
//! headings and cohesion toward their centroid. The world is a rectangle the
//! agents wrap around.
//!
//! Hosts drive the simulation with [`Flock::step`], add agents with the
//! `spawn*` methods and read [`Flock::agents`] to draw them.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod agent;
pub mod behavior;
pub mod error;
pub mod flock;
pub mod params;
pub mod sensor;
pub mod vector;
pub mod world;

pub use agent::{Agent, AgentId, Steering};
pub use error::{CapacityExceeded, FlockError, InvalidParameter, Parameter};
pub use flock::Flock;
pub use params::FlockParameters;
pub use sensor::{Neighbors, SensorRay};
pub use vector::Vector2D;
pub use world::WorldBounds;
