//! Item serialization plug-point
//!
//! Sketches hash bytes, not items. Each sketch carries an owned serializer
//! function turning an item into a byte buffer; determinism of that function
//! is required for correctness. The serializer is a plain generic `Fn` field
//! so dispatch stays static.

use std::fmt;

/// The serializer type installed by the `new` constructors
pub type DefaultSerializer<T> = fn(&T) -> Vec<u8>;

/// Default serializer: the item's stable textual representation as UTF-8
///
/// Extremely naive, but deterministic for any sensible `Display`
/// implementation, which is all a sketch needs.
///
/// # Examples
/// ```
/// use streamsketch::common::serializer::serialize_display;
///
/// assert_eq!(serialize_display(&42u32), b"42");
/// assert_eq!(serialize_display(&"abc"), b"abc");
/// ```
pub fn serialize_display<T: fmt::Display>(item: &T) -> Vec<u8> {
    item.to_string().into_bytes()
}
