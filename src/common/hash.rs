//! Seeded hash functions for data sketches
//!
//! Every sketch consumes one or two of these hashers. Two hashers built with
//! distinct seeds are treated as independent hash functions; the probabilistic
//! analyses of the sketches rest on that assumption. Both hashers compute the
//! canonical xxHash functions, so values are portable across implementations.

use std::hash::Hasher;
use twox_hash::XxHash64;
use xxhash_rust::xxh32::xxh32;

/// Seeded 64-bit xxHash function
///
/// Deterministic for a given `(seed, bytes)` pair and immutable after
/// construction.
///
/// # Examples
/// ```
/// use streamsketch::common::hash::XxHasher64;
///
/// let hasher = XxHasher64::new(42);
/// assert_eq!(hasher.hash(b"item"), hasher.hash(b"item"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XxHasher64 {
    seed: u64,
}

impl XxHasher64 {
    /// Creates a hasher with the given seed
    pub fn new(seed: u64) -> Self {
        XxHasher64 { seed }
    }

    /// Returns the seed this hasher was built with
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Hashes a byte buffer to a well-distributed 64-bit value
    #[inline]
    pub fn hash(&self, bytes: &[u8]) -> u64 {
        let mut hasher = XxHash64::with_seed(self.seed);
        hasher.write(bytes);
        hasher.finish()
    }
}

/// Seeded 32-bit xxHash function
///
/// Used where a short output is wanted, e.g. cuckoo fingerprinting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XxHasher32 {
    seed: u32,
}

impl XxHasher32 {
    /// Creates a hasher with the given seed
    pub fn new(seed: u32) -> Self {
        XxHasher32 { seed }
    }

    /// Returns the seed this hasher was built with
    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Hashes a byte buffer to a well-distributed 32-bit value
    #[inline]
    pub fn hash(&self, bytes: &[u8]) -> u32 {
        xxh32(bytes, self.seed)
    }
}
