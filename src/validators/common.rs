//! Common validation utilities and helpers.

use validator::ValidationErrors;

use crate::constants::CODE_VALIDATION_FAILED;
use crate::errors::{ApiError, FieldErrors};

/// Convert validator errors to ApiError::ValidationError.
///
/// Messages are grouped by field so clients can show them next to the input
/// that failed. Rules without a message fall back to their code.
///
/// # Example
/// ```ignore
/// body.validate().map_err(validation_errors_to_api_error)?;
/// ```
pub fn validation_errors_to_api_error(e: ValidationErrors) -> ApiError {
    let mut errors = FieldErrors::new();

    for (field, errs) in e.field_errors() {
        let messages = errs
            .iter()
            .map(|err| {
                err.message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| err.code.to_string())
            })
            .collect();
        errors.insert(field.to_string(), messages);
    }

    ApiError::ValidationError {
        code: CODE_VALIDATION_FAILED.to_string(),
        errors,
    }
}
