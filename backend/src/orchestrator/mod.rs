//! Orchestrator - main simulation loop
//!
//! Implements the tick loop over pair generation, dialogue scheduling,
//! reduction, and voting, with two interchangeable schedulers.
//!
//! See `engine.rs` for the loop, `batched.rs` and `actor.rs` for the
//! scheduler variants.

mod actor;
mod batched;
pub mod engine;

// Re-export main types for convenience
pub use engine::{run, sweep, SchedulerKind, SimConfig, Simulation, SimulationError};

// The topology selection travels with the run configuration.
pub use crate::topology::Topology;
