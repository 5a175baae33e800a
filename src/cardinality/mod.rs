//! Cardinality estimation
//!
//! Sketches answering "how many distinct items have I seen?" in sub-linear
//! memory, plus the exact keep-everything oracle used to measure them.

mod hyperloglog;
mod keep_all;

pub use hyperloglog::HyperLogLog;
pub use keep_all::KeepAllCounter;
