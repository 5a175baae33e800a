//! Membership testing
//!
//! Probabilistic filters answering "have I seen this item?" with zero false
//! negatives and a bounded false-positive rate, plus the exact oracle and
//! the single-hash baseline they are measured against.

mod bloom;
mod cuckoo;
mod keep_all;
mod naive;

pub use bloom::BloomFilter;
pub use cuckoo::CuckooFilter;
pub use keep_all::KeepAllFilter;
pub use naive::NaiveFilter;
