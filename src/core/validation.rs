//! Input validation utilities.
//!
//! Request-level precondition checks. Failures here reject the whole
//! request rather than producing per-image `invalid` predictions.

use crate::core::TriageError;

/// Validates that a collection is not empty.
#[inline]
pub fn validate_non_empty<T>(items: &[T], param_name: &str) -> Result<(), TriageError> {
    if items.is_empty() {
        return Err(TriageError::InvalidRequest {
            message: format!("Parameter '{}' cannot be empty", param_name),
        });
    }
    Ok(())
}

/// Validates that a value is within a specified range (inclusive).
#[inline]
pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    value: T,
    min: T,
    max: T,
    param_name: &str,
) -> Result<(), TriageError> {
    if value < min || value > max {
        return Err(TriageError::InvalidRequest {
            message: format!(
                "Parameter '{}' must be in range [{}, {}], got: {}",
                param_name, min, max, value
            ),
        });
    }
    Ok(())
}
