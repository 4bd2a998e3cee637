//! Opinion Simulator Core - Rust Engine
//!
//! Deterministic multi-agent opinion-dynamics simulator used as a
//! benchmarking workload. A fixed population holds probability
//! distributions over three alternatives; each tick, selected pairs update
//! both participants through a 9×9 transition matrix, contributions are
//! averaged per agent, and after the last tick every agent casts one vote.
//!
//! # Architecture
//!
//! - **core**: Tick clock and decimal rounding
//! - **models**: Domain types (AgentState, RunStats)
//! - **rng**: Deterministic random number generation
//! - **dialogue**: Transition matrix and the per-pair update kernel
//! - **topology**: Pair generation (all-pairs, random k-matching)
//! - **orchestrator**: Tick loop with batched and actor schedulers
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded LCG, explicit state threading)
//! 2. The RNG stream is consumed only on the main task, in a fixed order
//! 3. Scheduler variant and chunk size never change the output
//! 4. FFI boundary is minimal and safe

// Module declarations
pub mod core;
pub mod dialogue;
pub mod models;
pub mod orchestrator;
pub mod rng;
pub mod topology;

// Re-exports for convenience
pub use self::core::time::TickClock;
pub use models::{agent::AgentState, stats::RunStats};
pub use orchestrator::{
    run, sweep, SchedulerKind, SimConfig, Simulation, SimulationError,
};
pub use rng::Lcg;
pub use topology::{generate_pairs, Pair, Topology};

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn opinion_simulator_core_rs(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::run_json, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::sweep_json, m)?)?;
    Ok(())
}
