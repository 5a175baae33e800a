//! Common utilities, traits, and errors

pub mod bits;
mod error;
pub mod hash;
pub mod serializer;
mod traits;
pub mod validation;

pub use bits::BitArray;
pub use error::{Result, SketchError};
pub use serializer::{serialize_display, DefaultSerializer};
pub use traits::{ItemCounter, ItemFilter, ShrinkableFilter, Sketch};
