//! Deterministic random number generation
//!
//! Uses a fixed 64-bit linear congruential generator so that two independent
//! implementations produce bit-identical streams for the same seed.
//! CRITICAL: All randomness in the simulator MUST go through this module,
//! and only on the main task, in the documented draw order.

mod lcg;

pub use lcg::Lcg;
