//! Dialogue Module
//!
//! The per-pair update kernel of the simulation:
//! - Transition matrix construction from the pair's traits
//! - Joint-distribution projection and marginalization
//! - Round-then-normalize output conditioning
//!
//! # Critical Invariants
//!
//! 1. **Purity**: dialogue is a function of the two agent states alone
//! 2. **Row-stochasticity**: every transition matrix row sums to 1
//! 3. **Fixed rounding order**: 4-decimal rounding precedes normalization
//!
//! # Example
//!
//! ```rust
//! use opinion_simulator_core_rs::{AgentState, dialogue::dialogue};
//!
//! let alice = AgentState::new(0.3, 0.8, 0.9);
//! let bob = AgentState::new(0.9, 0.2, 0.1);
//!
//! let (next_alice, next_bob) = dialogue(&alice, &bob);
//! assert!((next_alice.iter().sum::<f64>() - 1.0).abs() < 1e-12);
//! assert!((next_bob.iter().sum::<f64>() - 1.0).abs() < 1e-12);
//! ```

pub mod kernel;
pub mod transition;

// Re-export public API
pub use kernel::dialogue;
pub use transition::{choice_probs, TransitionMatrix};
