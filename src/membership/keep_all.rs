//! Exact membership by keeping every item
//!
//! The O(n)-memory ground truth used by the false-positive-rate harnesses
//! and tests. Supports deletion, so it doubles as the shrinkable-filter
//! oracle.

use crate::common::{ItemFilter, Result, ShrinkableFilter, Sketch};
use std::collections::HashSet;
use std::hash::Hash;

/// Exact filter backed by a `HashSet`
#[derive(Debug, Clone, Default)]
pub struct KeepAllFilter<T> {
    items: HashSet<T>,
}

impl<T: Eq + Hash + Clone> KeepAllFilter<T> {
    /// Creates an empty filter
    pub fn new() -> Self {
        KeepAllFilter {
            items: HashSet::new(),
        }
    }

    /// Records the item
    pub fn add(&mut self, item: &T) {
        self.items.insert(item.clone());
    }

    /// Exact membership
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Removes the item; a no-op if absent
    pub fn delete(&mut self, item: &T) {
        self.items.remove(item);
    }

    /// Unions the other filter's items into this one
    pub fn merge_with(&mut self, other: &Self) {
        self.items.extend(other.items.iter().cloned());
    }

    /// Drops every recorded item
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Eq + Hash + Clone> Sketch for KeepAllFilter<T> {
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

impl<T: Eq + Hash + Clone> ItemFilter for KeepAllFilter<T> {
    fn contains(&self, item: &T) -> bool {
        self.contains(item)
    }
}

impl<T: Eq + Hash + Clone> ShrinkableFilter for KeepAllFilter<T> {
    fn delete(&mut self, item: &T) {
        self.delete(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_contains_delete() {
        let mut filter = KeepAllFilter::new();
        filter.add(&"test_item");
        assert!(filter.contains(&"test_item"));
        assert!(!filter.contains(&"other_item"));

        filter.delete(&"test_item");
        assert!(!filter.contains(&"test_item"));
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut filter: KeepAllFilter<&str> = KeepAllFilter::new();
        filter.delete(&"never_added");
        assert!(!filter.contains(&"never_added"));
    }

    #[test]
    fn test_merge() {
        let mut lhs = KeepAllFilter::new();
        let mut rhs = KeepAllFilter::new();
        lhs.add(&"left_item");
        rhs.add(&"right_item");
        lhs.merge_with(&rhs);
        assert!(lhs.contains(&"left_item") && lhs.contains(&"right_item"));
    }
}
