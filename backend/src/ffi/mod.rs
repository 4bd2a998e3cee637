//! Python FFI boundary
//!
//! Thin wrappers for Python benchmark drivers. Results cross the boundary
//! as JSON strings so the surface stays minimal and safe; argument
//! validation reuses the raw-integer front door of the core, so Python
//! callers see the same error taxonomy as native ones.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::orchestrator::{sweep, SimConfig, Simulation, SimulationError};

fn to_py_err(error: SimulationError) -> PyErr {
    PyValueError::new_err(error.to_string())
}

/// Run one simulation and return the statistics as a JSON string
///
/// `k = None` selects the all-pairs topology; a value selects random
/// k-matching.
#[pyfunction]
#[pyo3(signature = (n, ticks, seed, chunk, k=None))]
pub fn run_json(n: i64, ticks: i64, seed: i64, chunk: i64, k: Option<i64>) -> PyResult<String> {
    let config = SimConfig::from_raw(n, ticks, seed, chunk, k).map_err(to_py_err)?;
    let stats = Simulation::new(config)
        .map_err(to_py_err)?
        .run()
        .map_err(to_py_err)?;
    serde_json::to_string(&stats).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Run a population sweep and return all statistics as a JSON array
///
/// Elapsed milliseconds per run go to standard output, one integer per
/// line, exactly as the native `sweep` emits them.
#[pyfunction]
#[pyo3(signature = (min_n, max_n, ticks, seed, chunk, k=None))]
pub fn sweep_json(
    min_n: i64,
    max_n: i64,
    ticks: i64,
    seed: i64,
    chunk: i64,
    k: Option<i64>,
) -> PyResult<String> {
    if min_n < 2 || max_n < min_n {
        return Err(to_py_err(SimulationError::InvalidRange { min_n, max_n }));
    }
    // Validates ticks, chunk, and the topology against the smallest n.
    let config = SimConfig::from_raw(min_n, ticks, seed, chunk, k).map_err(to_py_err)?;
    let results = sweep(
        min_n as usize,
        max_n as usize,
        config.ticks,
        seed,
        config.chunk,
        config.topology,
    )
    .map_err(to_py_err)?;
    serde_json::to_string(&results).map_err(|e| PyValueError::new_err(e.to_string()))
}
