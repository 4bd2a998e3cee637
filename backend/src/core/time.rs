//! Time management for the simulation
//!
//! The simulation operates in discrete ticks. The tick counter starts at 0
//! prior to the first transition and advances once per completed tick.
//! This module provides deterministic time advancement.

use serde::{Deserialize, Serialize};

/// Manages simulation time in discrete ticks
///
/// # Example
/// ```
/// use opinion_simulator_core_rs::TickClock;
///
/// let mut clock = TickClock::new(10); // run of 10 ticks
/// assert_eq!(clock.current_tick(), 0);
/// assert!(!clock.is_complete());
///
/// clock.advance_tick();
/// assert_eq!(clock.current_tick(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickClock {
    /// Ticks elapsed since simulation start
    current_tick: usize,
    /// Total ticks in the run (may be zero)
    total_ticks: usize,
}

impl TickClock {
    /// Create a new TickClock for a run of `total_ticks` ticks
    ///
    /// A zero-length run is valid: the clock starts complete.
    ///
    /// # Example
    /// ```
    /// use opinion_simulator_core_rs::TickClock;
    ///
    /// let clock = TickClock::new(0);
    /// assert!(clock.is_complete());
    /// ```
    pub fn new(total_ticks: usize) -> Self {
        Self {
            current_tick: 0,
            total_ticks,
        }
    }

    /// Advance time by one tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Get the current tick (total ticks since start)
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Get the total tick count of the run
    pub fn total_ticks(&self) -> usize {
        self.total_ticks
    }

    /// Check whether the run has used up all its ticks
    pub fn is_complete(&self) -> bool {
        self.current_tick >= self.total_ticks
    }
}
