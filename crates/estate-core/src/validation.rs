//! Validation utilities.

use crate::{EstateError, FieldError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns an `EstateError` on failure.
    fn validate_request(&self) -> Result<(), EstateError> {
        self.validate().map_err(validation_errors_to_estate_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
///
/// Struct-level errors (from `#[validate(schema(...))]`) are reported under
/// the `__all__` field, as `validator` records them.
#[must_use]
pub fn validation_errors_to_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}

/// Converts `validator::ValidationErrors` to `EstateError`.
#[must_use]
pub fn validation_errors_to_estate_error(errors: ValidationErrors) -> EstateError {
    let message = validation_errors_to_field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    EstateError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that an upper price bound is not below the lower one.
    pub fn price_range(min: Option<f64>, max: Option<f64>) -> Result<(), ValidationError> {
        if let (Some(min), Some(max)) = (min, max) {
            if max < min {
                let mut err = ValidationError::new("price_range");
                err.message =
                    Some("max_price must be greater than or equal to min_price".into());
                return Err(err);
            }
        }
        Ok(())
    }
}
