//! Exact moments by keeping every value

use super::StreamMoments;

/// Exact O(n)-memory moments aggregator
#[derive(Debug, Clone, Default)]
pub struct KeepAllMoments {
    values: Vec<f64>,
}

impl KeepAllMoments {
    /// Creates an empty aggregator
    pub fn new() -> Self {
        KeepAllMoments { values: Vec::new() }
    }

    /// Number of values recorded
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no values were recorded
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The `order`-th central moment; NaN when empty
    fn central_moment(&self, order: i32) -> f64 {
        if self.values.is_empty() {
            return f64::NAN;
        }
        let mean = self.mean();
        self.values
            .iter()
            .map(|value| (value - mean).powi(order))
            .sum::<f64>()
            / self.values.len() as f64
    }
}

impl StreamMoments for KeepAllMoments {
    fn add(&mut self, value: f64) {
        self.values.push(value);
    }

    fn merge_with(&mut self, other: &Self) {
        self.values.extend_from_slice(&other.values);
    }

    fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return f64::NAN;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    fn variance(&self) -> f64 {
        self.central_moment(2)
    }

    fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    fn skewness(&self) -> f64 {
        let m2 = self.central_moment(2);
        self.central_moment(3) / m2.powf(1.5)
    }

    fn kurtosis(&self) -> f64 {
        let m2 = self.central_moment(2);
        self.central_moment(4) / (m2 * m2) - 3.0
    }
}
