//! Decimal rounding helpers
//!
//! The simulator rounds preference components at two fixed points in the
//! pipeline: 4 decimal places inside the dialogue kernel (before
//! normalization) and 3 decimal places in the statistics path. The two
//! widths are part of the output contract and must not be unified.
//!
//! Rounding is half-to-even on the scaled value, the same tie behavior a
//! Python `round(x, d)` applies on the value ranges this workload produces.

/// Round to 4 decimal places, ties to even
///
/// # Example
/// ```
/// use opinion_simulator_core_rs::core::round::round4;
///
/// assert_eq!(round4(0.33333333), 0.3333);
/// assert_eq!(round4(0.03125), 0.0312); // exact tie goes to the even digit
/// ```
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round_ties_even() / 10_000.0
}

/// Round to 3 decimal places, ties to even
///
/// # Example
/// ```
/// use opinion_simulator_core_rs::core::round::round3;
///
/// assert_eq!(round3(0.33333333), 0.333);
/// ```
pub fn round3(value: f64) -> f64 {
    (value * 1_000.0).round_ties_even() / 1_000.0
}
