//! Generic API response models.

use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::FieldErrors;

/// Error response structure
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Whether the request was successful (always false for errors)
    #[schema(example = false)]
    pub success: bool,
    /// Machine-readable error code
    #[schema(example = "VALIDATION_FAILED")]
    pub code: String,
    /// Error message
    #[schema(example = "Validation failed")]
    pub message: String,
    /// Validation messages keyed by field name (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>, example = json!({"name": ["The first letter must be uppercase"]}))]
    pub errors: Option<FieldErrors>,
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status
    #[schema(example = "OK")]
    pub status: String,
    /// Status message
    #[schema(example = "Server is running")]
    pub message: String,
}
