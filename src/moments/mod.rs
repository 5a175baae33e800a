//! Running moments of a numeric stream
//!
//! Mean, variance, and the shape moments (skewness, kurtosis) of the values
//! observed so far. Only the exact keep-everything aggregator is provided;
//! it is the oracle the streaming sketches are compared against.

mod keep_all;

pub use keep_all::KeepAllMoments;

/// Moment statistics over a stream of numbers
pub trait StreamMoments {
    /// Records one value
    fn add(&mut self, value: f64);

    /// Folds another aggregator's observations into this one
    fn merge_with(&mut self, other: &Self);

    /// Arithmetic mean; NaN when empty
    fn mean(&self) -> f64;

    /// Population variance; NaN when empty
    fn variance(&self) -> f64;

    /// Population standard deviation; NaN when empty
    fn standard_deviation(&self) -> f64;

    /// Skewness `g1 = m3 / m2^(3/2)`; NaN when empty or constant
    fn skewness(&self) -> f64;

    /// Excess kurtosis `m4 / m2^2 - 3`; NaN when empty or constant
    fn kurtosis(&self) -> f64;
}
