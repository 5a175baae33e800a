//! Single-hash bit-array filter
//!
//! One hash, one bit per item. Space-cheap and fast, but the false-positive
//! rate is just the fill fraction of the array, which a Bloom filter beats
//! at every realistic load. Kept as the accuracy baseline the Bloom filter
//! is measured against.

use crate::common::hash::XxHasher64;
use crate::common::serializer::{serialize_display, DefaultSerializer};
use crate::common::{validation, BitArray, ItemFilter, Result, Sketch};
use std::fmt;
use std::marker::PhantomData;

/// Naive one-probe membership filter
pub struct NaiveFilter<T, S = DefaultSerializer<T>> {
    bits: BitArray,
    bit_array_size: usize,
    hasher: XxHasher64,
    serializer: S,
    _item: PhantomData<fn(&T)>,
}

impl<T, S> NaiveFilter<T, S> {
    /// Default hash seed; a prime
    pub const DEFAULT_SEED: u64 = (1 << 20) - 3;
}

impl<T: fmt::Display> NaiveFilter<T> {
    /// Creates a filter over a bit array of the given size
    ///
    /// # Errors
    /// Returns `InvalidParameter` if the size is zero.
    pub fn new(bit_array_size: usize) -> Result<Self> {
        Self::with_seed(bit_array_size, Self::DEFAULT_SEED)
    }

    /// Creates a filter with an explicit hash seed
    pub fn with_seed(bit_array_size: usize, seed: u64) -> Result<Self> {
        Self::with_serializer(bit_array_size, seed, serialize_display::<T>)
    }
}

impl<T, S: Fn(&T) -> Vec<u8>> NaiveFilter<T, S> {
    /// Creates a filter with an explicit seed and a custom serializer
    pub fn with_serializer(bit_array_size: usize, seed: u64, serializer: S) -> Result<Self> {
        validation::validate_bit_size(bit_array_size, "bit_array_size")?;
        Ok(NaiveFilter {
            bits: BitArray::new(bit_array_size),
            bit_array_size,
            hasher: XxHasher64::new(seed),
            serializer,
            _item: PhantomData,
        })
    }

    #[inline]
    fn position(&self, item: &T) -> usize {
        let serialized = (self.serializer)(item);
        (self.hasher.hash(&serialized) % self.bit_array_size as u64) as usize
    }

    /// Sets the item's bit
    pub fn add(&mut self, item: &T) {
        let position = self.position(item);
        self.bits.set(position);
    }

    /// Returns true iff the item's bit is set
    pub fn contains(&self, item: &T) -> bool {
        self.bits.get(self.position(item))
    }

    /// Bitwise-ORs `other` into `self`
    ///
    /// # Panics
    /// Panics if the filters differ in size or seed.
    pub fn merge_with(&mut self, other: &Self) {
        assert_eq!(
            self.bit_array_size, other.bit_array_size,
            "cannot merge naive filters with different bit-array sizes"
        );
        assert_eq!(
            self.hasher.seed(),
            other.hasher.seed(),
            "cannot merge naive filters built with different hash seeds"
        );
        self.bits.union_with(&other.bits);
    }

    /// Zeroes every bit
    pub fn clear(&mut self) {
        self.bits.clear_all();
    }

    /// Bit-array size in bits
    #[inline]
    pub fn bit_array_size(&self) -> usize {
        self.bit_array_size
    }
}

impl<T, S: Fn(&T) -> Vec<u8>> Sketch for NaiveFilter<T, S> {
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

impl<T, S: Fn(&T) -> Vec<u8>> ItemFilter for NaiveFilter<T, S> {
    fn contains(&self, item: &T) -> bool {
        self.contains(item)
    }
}

impl<T, S> fmt::Debug for NaiveFilter<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NaiveFilter")
            .field("bit_array_size", &self.bit_array_size)
            .field("seed", &self.hasher.seed())
            .finish()
    }
}
