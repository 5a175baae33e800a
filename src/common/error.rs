//! Error types for sketch operations

use std::fmt;

/// Errors that can occur when constructing or operating a sketch
///
/// Merge parameter mismatches (different sizes or different hash seeds) are
/// programmer errors and panic instead of producing a variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SketchError {
    /// Invalid parameter provided to a sketch constructor
    InvalidParameter {
        /// Parameter name
        param: String,
        /// Invalid value provided
        value: String,
        /// Constraint that was violated
        constraint: String,
    },

    /// The requested operation is not defined for this sketch
    ///
    /// Returned by [`CuckooFilter::merge_with`](crate::membership::CuckooFilter):
    /// cuckoo tables are not composable. Callers that need mergeable
    /// membership should use a Bloom filter instead.
    NotSupported {
        /// What was attempted and why it cannot work
        reason: String,
    },

    /// A cuckoo insertion ran out of relocation attempts
    ///
    /// The filter is saturated around the item's candidate buckets. The
    /// caller may reject the item, or rebuild with a larger bit budget.
    InsertionFailure {
        /// How many relocations were attempted before giving up
        relocations: usize,
    },
}

impl fmt::Display for SketchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SketchError::InvalidParameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}': value '{}' {}",
                    param, value, constraint
                )
            }
            SketchError::NotSupported { reason } => {
                write!(f, "Operation not supported: {}", reason)
            }
            SketchError::InsertionFailure { relocations } => {
                write!(
                    f,
                    "Insertion failed after {} relocations; the filter is too full",
                    relocations
                )
            }
        }
    }
}

impl std::error::Error for SketchError {}

/// Result type alias for sketch operations
pub type Result<T> = std::result::Result<T, SketchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_parameter() {
        let err = SketchError::InvalidParameter {
            param: "target_fp_prob".to_string(),
            value: "1.5".to_string(),
            constraint: "must be in range (0.0, 1.0)".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("target_fp_prob"));
        assert!(msg.contains("1.5"));
    }

    #[test]
    fn test_display_insertion_failure() {
        let err = SketchError::InsertionFailure { relocations: 1024 };
        assert!(err.to_string().contains("1024"));
    }
}
