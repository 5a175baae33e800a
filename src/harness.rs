//! Measurement harnesses for sketch accuracy experiments
//!
//! These drive a sketch with a synthetic workload of unique random
//! identifiers (plus duplicates) and report observed accuracy. They are the
//! canonical test harnesses for this crate, not production APIs; the exact
//! keep-all oracles give them their ground truth.

use crate::common::{ItemCounter, ItemFilter, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Random 128-bit hex identifiers, unique with overwhelming probability
fn unique_identifiers(count: usize, rng: &mut SmallRng) -> Vec<String> {
    (0..count)
        .map(|_| format!("{:032x}", rng.random::<u128>()))
        .collect()
}

/// Measures a counter's real estimation error
///
/// Builds `unique_item_count` distinct identifiers, pads the stream with
/// random duplicates up to twice that size, feeds everything to the counter,
/// and returns `(observed_count, relative_error, elapsed)`.
///
/// # Errors
/// Propagates any error from the counter's `add`.
pub fn sample_real_error<C>(
    counter: &mut C,
    unique_item_count: usize,
    rng_seed: u64,
) -> Result<(f64, f64, Duration)>
where
    C: ItemCounter<Item = String>,
{
    let mut rng = SmallRng::seed_from_u64(rng_seed);
    let items = unique_identifiers(unique_item_count, &mut rng);
    let mut test_set = items.clone();
    while test_set.len() < 2 * unique_item_count {
        let index = rng.random_range(0..items.len());
        test_set.push(items[index].clone());
    }

    let start = Instant::now();
    for item in &test_set {
        counter.add(item)?;
    }
    let observed_count = counter.unique_count();
    let elapsed = start.elapsed();

    let error =
        ((observed_count - unique_item_count as f64) / unique_item_count as f64).abs();
    Ok((observed_count, error, elapsed))
}

/// Measures a filter's real false-positive rate at design load
///
/// Inserts `expected_item_count` distinct identifiers, probes
/// `ceil(10 / target_false_positive_prob)` identifiers that were never
/// inserted, and returns `(false_positive_fraction, probes_tested)`.
///
/// # Errors
/// Propagates any error from the filter's `add`.
pub fn sample_real_false_positive_rate<F>(
    filter: &mut F,
    expected_item_count: usize,
    target_false_positive_prob: f64,
    rng_seed: u64,
) -> Result<(f64, usize)>
where
    F: ItemFilter<Item = String>,
{
    let probe_count = (10.0 / target_false_positive_prob).ceil() as usize;
    sample_false_positive_rate_with_probes(filter, expected_item_count, probe_count, rng_seed)
}

/// [`sample_real_false_positive_rate`] with an explicit probe count
///
/// More probes tighten the confidence interval of the measured fraction;
/// accuracy tests use this to assert close to the design bound.
///
/// # Errors
/// Propagates any error from the filter's `add`.
pub fn sample_false_positive_rate_with_probes<F>(
    filter: &mut F,
    expected_item_count: usize,
    probe_count: usize,
    rng_seed: u64,
) -> Result<(f64, usize)>
where
    F: ItemFilter<Item = String>,
{
    let mut rng = SmallRng::seed_from_u64(rng_seed);
    let members = unique_identifiers(expected_item_count, &mut rng);
    let probes = unique_identifiers(probe_count, &mut rng);

    for item in &members {
        filter.add(item)?;
    }
    let false_positives = probes.iter().filter(|probe| filter.contains(probe)).count();
    Ok((false_positives as f64 / probe_count as f64, probe_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cardinality::KeepAllCounter;
    use crate::membership::KeepAllFilter;

    #[test]
    fn test_exact_counter_has_zero_error() {
        let mut counter = KeepAllCounter::new();
        let (observed, error, _elapsed) = sample_real_error(&mut counter, 10_000, 7).unwrap();
        assert_eq!(observed, 10_000.0);
        assert_eq!(error, 0.0);
    }

    #[test]
    fn test_exact_filter_has_zero_false_positives() {
        let mut filter = KeepAllFilter::new();
        let (fraction, tested) =
            sample_real_false_positive_rate(&mut filter, 1000, 0.01, 7).unwrap();
        assert_eq!(fraction, 0.0);
        assert_eq!(tested, 1000);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut first = KeepAllCounter::new();
        let mut second = KeepAllCounter::new();
        let (observed_a, _, _) = sample_real_error(&mut first, 100, 42).unwrap();
        let (observed_b, _, _) = sample_real_error(&mut second, 100, 42).unwrap();
        assert_eq!(observed_a, observed_b);
    }
}
