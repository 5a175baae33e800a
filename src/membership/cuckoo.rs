//! Cuckoo filter: membership with deletion (Fan et al. 2014)
//!
//! Stores a short fingerprint of each item in one of two candidate buckets.
//! When both candidates are full, a resident fingerprint is evicted to its
//! alternate bucket, cascading until a free slot turns up or the relocation
//! budget runs out. Because the alternate bucket is derived from the
//! fingerprint alone (`i XOR hash(fingerprint)`), relocation never needs the
//! original item.
//!
//! Unlike a Bloom filter, a cuckoo filter supports `delete`, and unlike a
//! Bloom filter it can refuse an insertion when it saturates. It does not
//! support merging; shard explicitly if you need parallel construction.
//!
//! # Examples
//!
//! ```
//! use streamsketch::membership::CuckooFilter;
//!
//! let mut filter = CuckooFilter::new(1000, 16 * 1024, 0.01).unwrap();
//! filter.add(&"key1").unwrap();
//! assert!(filter.contains(&"key1"));
//!
//! filter.delete(&"key1");
//! assert!(!filter.contains(&"key1"));
//! ```

use crate::common::hash::{XxHasher32, XxHasher64};
use crate::common::serializer::{serialize_display, DefaultSerializer};
use crate::common::{validation, BitArray, ItemFilter, Result, ShrinkableFilter, Sketch, SketchError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::marker::PhantomData;

/// Cuckoo filter: approximate membership with deletion
///
/// Fingerprints are packed densely into a flat bit array, `f` bits per slot,
/// little-endian within each slot. Slot liveness is tracked by per-bucket
/// occupancy counters: slots below the counter are live, the rest are dead,
/// and a fingerprint of zero is an ordinary storable value.
pub struct CuckooFilter<T, S = DefaultSerializer<T>> {
    fingerprint_bits: u32,
    fingerprint_mask: u32,
    slots_per_bucket: usize,
    number_of_buckets: usize,
    bucket_mask: u64,
    table: BitArray,
    occupancy: Vec<u8>,
    stored_items: usize,
    max_kicks: usize,
    fingerprint_hasher: XxHasher32,
    bucket_hasher: XxHasher64,
    rng: SmallRng,
    serializer: S,
    _item: PhantomData<fn(&T)>,
}

impl<T, S> CuckooFilter<T, S> {
    /// Default seeds for the fingerprint and bucket hashers; two primes, on
    /// the assumption that distinctly seeded xxHash instances are independent
    pub const DEFAULT_SEEDS: (u32, u64) = ((1 << 11) - 9, (1 << 20) - 3);

    /// Slots per bucket
    pub const SLOTS_PER_BUCKET: usize = 4;

    /// Relocation budget per insertion
    pub const MAX_KICKS: usize = 1024;

    /// Widest supported fingerprint
    pub const MAX_FINGERPRINT_BITS: u32 = 32;

    /// Default eviction-PRNG seed, fixed for reproducibility
    pub const DEFAULT_RNG_SEED: u64 = 0x1234_5678;
}

impl<T: fmt::Display> CuckooFilter<T> {
    /// Creates a filter within a total bit budget
    ///
    /// The fingerprint width is derived as
    /// `ceil(max(ln(n / slots_per_bucket), log2(slots_per_bucket / p)))`,
    /// clamped to `[1, 32]`; the bucket count is the budget divided by the
    /// bucket width, rounded down to a power of two so that the XOR
    /// relocation map is an exact involution.
    ///
    /// # Errors
    /// Returns `InvalidParameter` for a zero item count, a probability
    /// outside (0, 1), or a bit budget too small for a single bucket.
    pub fn new(
        expected_item_count: usize,
        target_total_bits: usize,
        target_false_positive_prob: f64,
    ) -> Result<Self> {
        Self::with_serializer(
            expected_item_count,
            target_total_bits,
            target_false_positive_prob,
            None,
            Self::DEFAULT_RNG_SEED,
            serialize_display::<T>,
        )
    }

    /// Creates a filter with an explicit fingerprint width
    ///
    /// Cuckoo filters are much harder to tune than Bloom filters; an
    /// empirically chosen width can beat the derived one.
    pub fn with_fingerprint_bits(
        expected_item_count: usize,
        target_total_bits: usize,
        target_false_positive_prob: f64,
        fingerprint_bits: u32,
    ) -> Result<Self> {
        Self::with_serializer(
            expected_item_count,
            target_total_bits,
            target_false_positive_prob,
            Some(fingerprint_bits),
            Self::DEFAULT_RNG_SEED,
            serialize_display::<T>,
        )
    }
}

impl<T, S: Fn(&T) -> Vec<u8>> CuckooFilter<T, S> {
    /// Creates a filter with full control over fingerprint width, eviction
    /// PRNG seed, and serializer
    pub fn with_serializer(
        expected_item_count: usize,
        target_total_bits: usize,
        target_false_positive_prob: f64,
        fingerprint_bits: Option<u32>,
        rng_seed: u64,
        serializer: S,
    ) -> Result<Self> {
        validation::validate_item_count(expected_item_count)?;
        validation::validate_probability(target_false_positive_prob, "target_false_positive_prob")?;
        validation::validate_bit_size(target_total_bits, "target_total_bits")?;

        let slots_per_bucket = Self::SLOTS_PER_BUCKET;
        let fingerprint_bits = match fingerprint_bits {
            Some(bits) => {
                validation::validate_fingerprint_bits(bits)?;
                bits
            }
            None => Self::derive_fingerprint_bits(
                expected_item_count,
                target_false_positive_prob,
                slots_per_bucket,
            ),
        };

        let bucket_width_bits = slots_per_bucket * fingerprint_bits as usize;
        let raw_buckets = target_total_bits / bucket_width_bits;
        if raw_buckets == 0 {
            return Err(SketchError::InvalidParameter {
                param: "target_total_bits".to_string(),
                value: target_total_bits.to_string(),
                constraint: format!("must hold at least one {}-bit bucket", bucket_width_bits),
            });
        }
        // Round down to a power of two: bucket addressing must be a bitmask
        // for `i ^ hash(fingerprint)` to be its own inverse, which is what
        // lets an evicted fingerprint always find its way back
        let number_of_buckets = 1usize << (usize::BITS - 1 - raw_buckets.leading_zeros());

        let fingerprint_mask = if fingerprint_bits == 32 {
            u32::MAX
        } else {
            (1u32 << fingerprint_bits) - 1
        };

        Ok(CuckooFilter {
            fingerprint_bits,
            fingerprint_mask,
            slots_per_bucket,
            number_of_buckets,
            bucket_mask: number_of_buckets as u64 - 1,
            table: BitArray::new(number_of_buckets * bucket_width_bits),
            occupancy: vec![0u8; number_of_buckets],
            stored_items: 0,
            max_kicks: Self::MAX_KICKS,
            fingerprint_hasher: XxHasher32::new(Self::DEFAULT_SEEDS.0),
            bucket_hasher: XxHasher64::new(Self::DEFAULT_SEEDS.1),
            rng: SmallRng::seed_from_u64(rng_seed),
            serializer,
            _item: PhantomData,
        })
    }

    /// `ceil(max(ln(n/slots), log2(slots/p)))`, clamped to `[1, 32]`
    fn derive_fingerprint_bits(
        expected_item_count: usize,
        target_false_positive_prob: f64,
        slots_per_bucket: usize,
    ) -> u32 {
        let for_item_count = (expected_item_count as f64 / slots_per_bucket as f64).ln();
        let for_fp_prob = (slots_per_bucket as f64 / target_false_positive_prob).log2();
        let bits = for_item_count.max(for_fp_prob).ceil();
        if bits < 1.0 {
            1
        } else if bits >= f64::from(Self::MAX_FINGERPRINT_BITS) {
            Self::MAX_FINGERPRINT_BITS
        } else {
            bits as u32
        }
    }

    #[inline]
    fn fingerprint(&self, serialized: &[u8]) -> u32 {
        self.fingerprint_hasher.hash(serialized) & self.fingerprint_mask
    }

    #[inline]
    fn primary_bucket(&self, serialized: &[u8]) -> usize {
        (self.bucket_hasher.hash(serialized) & self.bucket_mask) as usize
    }

    /// The other candidate bucket of a fingerprint; an involution
    #[inline]
    fn alternate_bucket(&self, bucket: usize, fingerprint: u32) -> usize {
        let fingerprint_hash = self.bucket_hasher.hash(&fingerprint.to_le_bytes());
        ((bucket as u64 ^ fingerprint_hash) & self.bucket_mask) as usize
    }

    #[inline]
    fn slot_offset(&self, bucket: usize, slot: usize) -> usize {
        (bucket * self.slots_per_bucket + slot) * self.fingerprint_bits as usize
    }

    #[inline]
    fn read_slot(&self, bucket: usize, slot: usize) -> u32 {
        self.table
            .get_range(self.slot_offset(bucket, slot), self.fingerprint_bits)
    }

    #[inline]
    fn write_slot(&mut self, bucket: usize, slot: usize, fingerprint: u32) {
        self.table.set_range(
            self.slot_offset(bucket, slot),
            self.fingerprint_bits,
            fingerprint,
        );
    }

    #[inline]
    fn has_free_slot(&self, bucket: usize) -> bool {
        (self.occupancy[bucket] as usize) < self.slots_per_bucket
    }

    /// Finds the slot index of a fingerprint within the occupied prefix
    fn find_in_bucket(&self, bucket: usize, fingerprint: u32) -> Option<usize> {
        (0..self.occupancy[bucket] as usize)
            .find(|&slot| self.read_slot(bucket, slot) == fingerprint)
    }

    fn append_to_bucket(&mut self, bucket: usize, fingerprint: u32) {
        let slot = self.occupancy[bucket] as usize;
        self.write_slot(bucket, slot, fingerprint);
        self.occupancy[bucket] += 1;
        self.stored_items += 1;
    }

    /// Stores the item's fingerprint, relocating residents if needed
    ///
    /// # Errors
    /// Returns `InsertionFailure` when the relocation budget exhausts. The
    /// filter stays consistent, but the fingerprint left in hand when the
    /// budget ran out is dropped, so one resident item may be forgotten
    /// along with the new one.
    pub fn add(&mut self, item: &T) -> Result<()> {
        let serialized = (self.serializer)(item);
        let mut fingerprint = self.fingerprint(&serialized);
        let primary = self.primary_bucket(&serialized);
        let alternate = self.alternate_bucket(primary, fingerprint);

        for bucket in [primary, alternate] {
            if self.has_free_slot(bucket) {
                self.append_to_bucket(bucket, fingerprint);
                return Ok(());
            }
        }

        let mut current = if self.rng.random::<bool>() {
            primary
        } else {
            alternate
        };
        for _ in 0..self.max_kicks {
            // Both candidates were full, so every bucket we kick in is full
            let victim = self.rng.random_range(0..self.occupancy[current] as usize);
            let evicted = self.read_slot(current, victim);
            self.write_slot(current, victim, fingerprint);
            fingerprint = evicted;
            current = self.alternate_bucket(current, fingerprint);
            if self.has_free_slot(current) {
                self.append_to_bucket(current, fingerprint);
                return Ok(());
            }
        }
        Err(SketchError::InsertionFailure {
            relocations: self.max_kicks,
        })
    }

    /// Returns true iff either candidate bucket holds the item's fingerprint
    pub fn contains(&self, item: &T) -> bool {
        let serialized = (self.serializer)(item);
        let fingerprint = self.fingerprint(&serialized);
        let primary = self.primary_bucket(&serialized);
        let alternate = self.alternate_bucket(primary, fingerprint);
        self.find_in_bucket(primary, fingerprint).is_some()
            || self.find_in_bucket(alternate, fingerprint).is_some()
    }

    /// Removes at most one copy of the item's fingerprint
    ///
    /// The freed slot is filled with the bucket's last occupied slot. A
    /// no-op if the fingerprint is absent. Deleting an item that was never
    /// added can remove a colliding fingerprint of a different item; only
    /// delete what you previously added.
    pub fn delete(&mut self, item: &T) {
        let serialized = (self.serializer)(item);
        let fingerprint = self.fingerprint(&serialized);
        let primary = self.primary_bucket(&serialized);
        let alternate = self.alternate_bucket(primary, fingerprint);

        for bucket in [primary, alternate] {
            if let Some(slot) = self.find_in_bucket(bucket, fingerprint) {
                let last = self.occupancy[bucket] as usize - 1;
                let last_fingerprint = self.read_slot(bucket, last);
                self.write_slot(bucket, slot, last_fingerprint);
                self.occupancy[bucket] -= 1;
                self.stored_items -= 1;
                return;
            }
        }
    }

    /// Cuckoo tables are not composable
    ///
    /// # Errors
    /// Always returns `NotSupported`; switch to a Bloom filter if you need
    /// mergeable membership.
    pub fn merge_with(&mut self, _other: &Self) -> Result<()> {
        Err(SketchError::NotSupported {
            reason: "cuckoo filters are not composable; consider a Bloom filter instead"
                .to_string(),
        })
    }

    /// Zeroes the table and all occupancy counters
    pub fn clear(&mut self) {
        self.table.clear_all();
        self.occupancy.fill(0);
        self.stored_items = 0;
    }

    /// Fingerprint width in bits
    #[inline]
    pub fn fingerprint_bits(&self) -> u32 {
        self.fingerprint_bits
    }

    /// Number of buckets (always a power of two)
    #[inline]
    pub fn buckets(&self) -> usize {
        self.number_of_buckets
    }

    /// Slots per bucket
    #[inline]
    pub fn slots_per_bucket(&self) -> usize {
        self.slots_per_bucket
    }

    /// Number of fingerprints currently stored
    #[inline]
    pub fn len(&self) -> usize {
        self.stored_items
    }

    /// Returns true if nothing is stored
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stored_items == 0
    }

    /// Fraction of slots in use
    pub fn load_factor(&self) -> f64 {
        self.stored_items as f64 / (self.number_of_buckets * self.slots_per_bucket) as f64
    }

    /// Table size in bits
    pub fn size_in_bits(&self) -> usize {
        self.table.len()
    }
}

impl<T, S: Fn(&T) -> Vec<u8>> Sketch for CuckooFilter<T, S> {
    type Item = T;

    fn add(&mut self, item: &T) -> Result<()> {
        self.add(item)
    }

    fn clear(&mut self) {
        self.clear();
    }

    fn merge_with(&mut self, other: &Self) -> Result<()> {
        self.merge_with(other)
    }
}

impl<T, S: Fn(&T) -> Vec<u8>> ItemFilter for CuckooFilter<T, S> {
    fn contains(&self, item: &T) -> bool {
        self.contains(item)
    }
}

impl<T, S: Fn(&T) -> Vec<u8>> ShrinkableFilter for CuckooFilter<T, S> {
    fn delete(&mut self, item: &T) {
        self.delete(item);
    }
}

impl<T, S: Clone> Clone for CuckooFilter<T, S> {
    fn clone(&self) -> Self {
        CuckooFilter {
            fingerprint_bits: self.fingerprint_bits,
            fingerprint_mask: self.fingerprint_mask,
            slots_per_bucket: self.slots_per_bucket,
            number_of_buckets: self.number_of_buckets,
            bucket_mask: self.bucket_mask,
            table: self.table.clone(),
            occupancy: self.occupancy.clone(),
            stored_items: self.stored_items,
            max_kicks: self.max_kicks,
            fingerprint_hasher: self.fingerprint_hasher,
            bucket_hasher: self.bucket_hasher,
            rng: self.rng.clone(),
            serializer: self.serializer.clone(),
            _item: PhantomData,
        }
    }
}

impl<T, S> fmt::Debug for CuckooFilter<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CuckooFilter")
            .field("fingerprint_bits", &self.fingerprint_bits)
            .field("buckets", &self.number_of_buckets)
            .field("slots_per_bucket", &self.slots_per_bucket)
            .field("stored_items", &self.stored_items)
            .finish()
    }
}
