//! streamsketch: approximate, mergeable sketches for unbounded streams
//!
//! Given a potentially enormous stream of items, these sketches answer
//! "is X present?" and "how many distinct items have I seen?" in sub-linear
//! memory, at the cost of a bounded, tunable error:
//!
//! - [`HyperLogLog`] estimates distinct counts with `~1.04/sqrt(b)` relative
//!   error in a few kilobytes
//! - [`BloomFilter`] answers insert-only membership with zero false
//!   negatives and a configured false-positive rate
//! - [`CuckooFilter`] answers membership with deletion support
//!
//! HyperLogLog and Bloom merge commutatively and associatively, so shards
//! built in parallel can be combined at the end; cuckoo tables cannot and
//! must be sharded explicitly. Exact keep-everything oracles and the
//! measurement harnesses that grade the sketches against them live in
//! [`cardinality`], [`membership`] and [`harness`].
//!
//! # Examples
//!
//! ```
//! use streamsketch::{BloomFilter, HyperLogLog};
//!
//! let mut seen = BloomFilter::new(10_000, 0.01).unwrap();
//! let mut distinct = HyperLogLog::new(1024).unwrap();
//!
//! for user in ["ada", "grace", "ada"] {
//!     seen.add(&user);
//!     distinct.add(&user);
//! }
//!
//! assert!(seen.contains(&"ada"));
//! assert!(!seen.contains(&"linus"));
//! assert!((distinct.unique_count() - 2.0).abs() < 1.0);
//! ```

pub mod cardinality;
pub mod common;
pub mod harness;
pub mod membership;
pub mod moments;

pub use common::{
    ItemCounter, ItemFilter, Result, ShrinkableFilter, Sketch, SketchError,
};

pub use cardinality::{HyperLogLog, KeepAllCounter};
pub use membership::{BloomFilter, CuckooFilter, KeepAllFilter, NaiveFilter};
pub use moments::{KeepAllMoments, StreamMoments};

/// Error types and result alias for sketch operations
pub mod error {
    pub use crate::common::{Result, SketchError};
}
