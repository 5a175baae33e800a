//! Parameter validation for sketch constructors

use super::error::{Result, SketchError};

/// Maximum expected-item count accepted by any constructor (~2.1 billion)
pub const MAX_ITEM_COUNT: usize = (1 << 31) - 1;

/// Maximum bucket count a HyperLogLog may request
pub const MAX_BUCKET_REQUEST: usize = 1 << 30;

/// Validate that an expected-item count is positive and within limits
pub fn validate_item_count(count: usize) -> Result<()> {
    if count == 0 {
        return Err(SketchError::InvalidParameter {
            param: "expected_item_count".to_string(),
            value: count.to_string(),
            constraint: "must be greater than 0".to_string(),
        });
    }
    if count > MAX_ITEM_COUNT {
        return Err(SketchError::InvalidParameter {
            param: "expected_item_count".to_string(),
            value: count.to_string(),
            constraint: format!("must not exceed {}", MAX_ITEM_COUNT),
        });
    }
    Ok(())
}

/// Validate that a value is a probability in the open interval (0, 1)
pub fn validate_probability(value: f64, param_name: &str) -> Result<()> {
    if !(value > 0.0 && value < 1.0) {
        return Err(SketchError::InvalidParameter {
            param: param_name.to_string(),
            value: value.to_string(),
            constraint: "must be in range (0.0, 1.0) (exclusive)".to_string(),
        });
    }
    Ok(())
}

/// Validate a requested HyperLogLog bucket count before power-of-two rounding
pub fn validate_bucket_request(requested: usize) -> Result<()> {
    if requested == 0 {
        return Err(SketchError::InvalidParameter {
            param: "requested_number_of_buckets".to_string(),
            value: requested.to_string(),
            constraint: "must be greater than 0".to_string(),
        });
    }
    if requested > MAX_BUCKET_REQUEST {
        return Err(SketchError::InvalidParameter {
            param: "requested_number_of_buckets".to_string(),
            value: requested.to_string(),
            constraint: format!("must not exceed {}", MAX_BUCKET_REQUEST),
        });
    }
    Ok(())
}

/// Validate an explicit cuckoo fingerprint width
pub fn validate_fingerprint_bits(bits: u32) -> Result<()> {
    if !(1..=32).contains(&bits) {
        return Err(SketchError::InvalidParameter {
            param: "fingerprint_bits".to_string(),
            value: bits.to_string(),
            constraint: "must be in range [1, 32]".to_string(),
        });
    }
    Ok(())
}

/// Validate that a bit budget or bit-array size is positive
pub fn validate_bit_size(size: usize, param_name: &str) -> Result<()> {
    if size == 0 {
        return Err(SketchError::InvalidParameter {
            param: param_name.to_string(),
            value: size.to_string(),
            constraint: "must be greater than 0".to_string(),
        });
    }
    Ok(())
}
