//! Capability traits implemented by every sketch
//!
//! The capability split mirrors how the sketches differ: everything can
//! `add`, `clear` and (attempt to) merge; counters additionally estimate a
//! cardinality; filters additionally answer membership; shrinkable filters
//! additionally delete.

use super::error::Result;

/// Base contract shared by all sketches
///
/// `add` and `merge_with` are fallible at the trait level only because the
/// cuckoo filter can fail them (`InsertionFailure` when its relocation
/// budget exhausts, `NotSupported` for merge). Every other sketch in this
/// crate always returns `Ok`; for those, merging two sketches built with
/// different parameters or seeds is a programmer error and panics.
pub trait Sketch {
    /// The type of items this sketch consumes
    type Item;

    /// Records one item occurrence
    fn add(&mut self, item: &Self::Item) -> Result<()>;

    /// Resets the sketch to its freshly-constructed state
    fn clear(&mut self);

    /// Folds another sketch built from a disjoint shard of the stream into
    /// this one, as if both streams had been fed to a single sketch
    fn merge_with(&mut self, other: &Self) -> Result<()>;
}

/// Sketches that estimate the number of distinct items observed
pub trait ItemCounter: Sketch {
    /// Estimated count of distinct items; a non-negative real number
    fn unique_count(&self) -> f64;
}

/// Sketches that answer approximate membership queries
///
/// Membership sketches never produce false negatives: an item that was
/// added (and not deleted) always answers `true`.
pub trait ItemFilter: Sketch {
    /// Returns true if the item may have been added; false means definitely not
    fn contains(&self, item: &Self::Item) -> bool;
}

/// Membership sketches that also support deletion
pub trait ShrinkableFilter: ItemFilter {
    /// Removes one occurrence of the item; a no-op if it is not present
    ///
    /// Only delete items that were previously added: deleting a never-added
    /// item can evict a colliding fingerprint of a different item.
    fn delete(&mut self, item: &Self::Item);
}
