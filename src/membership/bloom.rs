//! Bloom filter with enhanced double hashing
//!
//! A `k`-hash bit-array membership sketch: zero false negatives, tunable
//! false-positive rate. Probe positions come from the enhanced double
//! hashing scheme `(h1 + i*h2 + i^2) mod m` (Dillinger & Manolios via
//! Kirsch-Mitzenmacher), which needs only two base hashes per item and
//! defeats the correlated-probe pathologies of plain `h1 + i*h2`.
//!
//! # Examples
//!
//! ```
//! use streamsketch::membership::BloomFilter;
//!
//! let mut filter = BloomFilter::new(1000, 0.01).unwrap();
//! filter.add(&"key1");
//! filter.add(&"key2");
//!
//! assert!(filter.contains(&"key1"));
//! assert!(!filter.contains(&"key3")); // almost certainly
//! ```

use crate::common::hash::XxHasher64;
use crate::common::serializer::{serialize_display, DefaultSerializer};
use crate::common::{validation, BitArray, ItemFilter, Result, Sketch};
use std::fmt;
use std::marker::PhantomData;

/// Bloom filter for insert-only membership testing
pub struct BloomFilter<T, S = DefaultSerializer<T>> {
    bits: BitArray,
    bit_array_size: usize,
    hash_count: usize,
    hashers: [XxHasher64; 2],
    serializer: S,
    _item: PhantomData<fn(&T)>,
}

impl<T, S> BloomFilter<T, S> {
    /// Default seeds for the two base hashers; two large primes, on the
    /// assumption that distinctly seeded xxHash instances are independent
    pub const DEFAULT_SEEDS: (u64, u64) = ((1 << 20) - 3, u64::MAX - 58);
}

impl<T: fmt::Display> BloomFilter<T> {
    /// Creates a filter sized for `expected_item_count` insertions at the
    /// target false-positive probability
    ///
    /// Bit-array size `m = ceil(-n * ln(p) / ln(2)^2)` and hash count
    /// `k = ceil(-log2(p))`, the optima for the classic occupancy analysis.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if `expected_item_count` is zero or the
    /// probability is outside (0, 1).
    pub fn new(expected_item_count: usize, target_false_positive_prob: f64) -> Result<Self> {
        Self::with_seeds(
            expected_item_count,
            target_false_positive_prob,
            Self::DEFAULT_SEEDS,
        )
    }

    /// Creates a filter with explicit base-hash seeds
    pub fn with_seeds(
        expected_item_count: usize,
        target_false_positive_prob: f64,
        seeds: (u64, u64),
    ) -> Result<Self> {
        Self::with_serializer(
            expected_item_count,
            target_false_positive_prob,
            seeds,
            serialize_display::<T>,
        )
    }
}

impl<T, S: Fn(&T) -> Vec<u8>> BloomFilter<T, S> {
    /// Creates a filter with explicit seeds and a custom serializer
    pub fn with_serializer(
        expected_item_count: usize,
        target_false_positive_prob: f64,
        seeds: (u64, u64),
        serializer: S,
    ) -> Result<Self> {
        validation::validate_item_count(expected_item_count)?;
        validation::validate_probability(target_false_positive_prob, "target_false_positive_prob")?;

        let bit_array_size = (-(expected_item_count as f64) * target_false_positive_prob.ln()
            / (std::f64::consts::LN_2 * std::f64::consts::LN_2))
            .ceil() as usize;
        let hash_count = ((-target_false_positive_prob.log2()).ceil() as usize).max(1);

        Ok(BloomFilter {
            bits: BitArray::new(bit_array_size),
            bit_array_size,
            hash_count,
            hashers: [XxHasher64::new(seeds.0), XxHasher64::new(seeds.1)],
            serializer,
            _item: PhantomData,
        })
    }

    /// Probe position for the `i`-th derived hash function:
    /// `(h1 + i*h2 + i^2) mod m`
    #[inline]
    fn probe_position(&self, base: (u64, u64), index: usize) -> usize {
        let i = index as u64;
        let combined = base
            .0
            .wrapping_add(i.wrapping_mul(base.1))
            .wrapping_add(i.wrapping_mul(i));
        (combined % self.bit_array_size as u64) as usize
    }

    #[inline]
    fn base_hashes(&self, serialized: &[u8]) -> (u64, u64) {
        (
            self.hashers[0].hash(serialized),
            self.hashers[1].hash(serialized),
        )
    }

    /// Sets all `k` probe bits for the item
    pub fn add(&mut self, item: &T) {
        let serialized = (self.serializer)(item);
        let base = self.base_hashes(&serialized);
        for index in 0..self.hash_count {
            self.bits.set(self.probe_position(base, index));
        }
    }

    /// Returns true iff all `k` probe bits are set
    ///
    /// `false` is definitive; `true` may be a false positive.
    pub fn contains(&self, item: &T) -> bool {
        let serialized = (self.serializer)(item);
        let base = self.base_hashes(&serialized);
        (0..self.hash_count).all(|index| self.bits.get(self.probe_position(base, index)))
    }

    /// Bitwise-ORs `other` into `self`, yielding the filter of the union
    ///
    /// # Panics
    /// Panics if the filters differ in size, hash count, or seeds.
    pub fn merge_with(&mut self, other: &Self) {
        assert_eq!(
            self.bit_array_size, other.bit_array_size,
            "cannot merge Bloom filters with different bit-array sizes"
        );
        assert_eq!(
            self.hash_count, other.hash_count,
            "cannot merge Bloom filters with different hash counts"
        );
        assert_eq!(
            self.seeds(),
            other.seeds(),
            "cannot merge Bloom filters built with different hash seeds"
        );
        self.bits.union_with(&other.bits);
    }

    /// Zeroes every bit
    pub fn clear(&mut self) {
        self.bits.clear_all();
    }

    /// Bit-array size `m` in bits
    #[inline]
    pub fn bit_array_size(&self) -> usize {
        self.bit_array_size
    }

    /// Number of derived hash functions `k`
    #[inline]
    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// Seeds of the two base hashers
    #[inline]
    pub fn seeds(&self) -> (u64, u64) {
        (self.hashers[0].seed(), self.hashers[1].seed())
    }

    /// Number of bits currently set
    pub fn set_bits(&self) -> usize {
        self.bits.count_ones()
    }

    /// Returns true if no items were ever added
    pub fn is_empty(&self) -> bool {
        self.bits.count_ones() == 0
    }
}

impl<T, S: Fn(&T) -> Vec<u8>> Sketch for BloomFilter<T, S> {
    type Item = T;

    fn add(&mut self, item: &T) -> Result<()> {
        self.add(item);
        Ok(())
    }

    fn clear(&mut self) {
        self.clear();
    }

    fn merge_with(&mut self, other: &Self) -> Result<()> {
        self.merge_with(other);
        Ok(())
    }
}

impl<T, S: Fn(&T) -> Vec<u8>> ItemFilter for BloomFilter<T, S> {
    fn contains(&self, item: &T) -> bool {
        self.contains(item)
    }
}

impl<T, S: Clone> Clone for BloomFilter<T, S> {
    fn clone(&self) -> Self {
        BloomFilter {
            bits: self.bits.clone(),
            bit_array_size: self.bit_array_size,
            hash_count: self.hash_count,
            hashers: self.hashers,
            serializer: self.serializer.clone(),
            _item: PhantomData,
        }
    }
}

impl<T, S: Fn(&T) -> Vec<u8>> fmt::Debug for BloomFilter<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomFilter")
            .field("bit_array_size", &self.bit_array_size)
            .field("hash_count", &self.hash_count)
            .field("seeds", &self.seeds())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_derivation() {
        let filter = BloomFilter::<String>::new(1000, 0.01).unwrap();
        // m = ceil(-1000 * ln(0.01) / ln(2)^2) = 9586, k = ceil(-log2(0.01)) = 7
        assert_eq!(filter.bit_array_size(), 9586);
        assert_eq!(filter.hash_count(), 7);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(BloomFilter::<String>::new(0, 0.01).is_err());
        assert!(BloomFilter::<String>::new(100, 0.0).is_err());
        assert!(BloomFilter::<String>::new(100, 1.0).is_err());
        assert!(BloomFilter::<String>::new(100, 1.5).is_err());
    }

    #[test]
    fn test_add_and_contains() {
        let mut filter = BloomFilter::<&str>::new(100, 0.01).unwrap();
        filter.add(&"key1");
        filter.add(&"key2");
        assert!(filter.contains(&"key1"));
        assert!(filter.contains(&"key2"));
    }

    #[test]
    fn test_empty_filter_contains_nothing() {
        let filter = BloomFilter::<&str>::new(100, 0.01).unwrap();
        assert!(!filter.contains(&"key1"));
        assert!(filter.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut filter = BloomFilter::<&str>::new(100, 0.01).unwrap();
        filter.add(&"key1");
        assert!(!filter.is_empty());
        filter.clear();
        assert!(filter.is_empty());
        assert!(!filter.contains(&"key1"));
    }

    #[test]
    #[should_panic(expected = "different bit-array sizes")]
    fn test_merge_size_mismatch_panics() {
        let mut lhs = BloomFilter::<&str>::new(100, 0.01).unwrap();
        let rhs = BloomFilter::<&str>::new(200, 0.01).unwrap();
        lhs.merge_with(&rhs);
    }

    #[test]
    #[should_panic(expected = "different hash seeds")]
    fn test_merge_seed_mismatch_panics() {
        let mut lhs = BloomFilter::<&str>::new(100, 0.01).unwrap();
        let rhs = BloomFilter::<&str>::with_seeds(100, 0.01, (11, 13)).unwrap();
        lhs.merge_with(&rhs);
    }

    #[test]
    fn test_custom_serializer() {
        let mut filter = BloomFilter::with_serializer(
            100,
            0.01,
            BloomFilter::<u32>::DEFAULT_SEEDS,
            |value: &u32| value.to_le_bytes().to_vec(),
        )
        .unwrap();
        filter.add(&42u32);
        assert!(filter.contains(&42u32));
        assert!(!filter.contains(&43u32));
    }
}
