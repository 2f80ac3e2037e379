//! Error code constants for API responses.
//!
//! These codes provide a machine-readable identifier for each error type,
//! making it easier for API clients to handle errors programmatically.

// Validation errors
pub const CODE_VALIDATION_FAILED: &str = "VALIDATION_FAILED";
pub const CODE_INVALID_PAGINATION: &str = "INVALID_PAGINATION";
pub const CODE_INVALID_JSON: &str = "INVALID_JSON";
pub const CODE_INVALID_QUERY: &str = "INVALID_QUERY";

// Genre errors
pub const CODE_GENRE_NOT_FOUND: &str = "GENRE_NOT_FOUND";

// Generic errors
pub const CODE_INTERNAL_ERROR: &str = "INTERNAL_ERROR";
pub const CODE_DATABASE_ERROR: &str = "DATABASE_ERROR";
pub const CODE_SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
