//! Application constants module.
//!
//! This module centralizes constant strings used throughout the application,
//! including error messages, error codes, pagination defaults, cache tags and
//! collection names.

pub mod cache;
pub mod collections;
pub mod error_codes;
pub mod errors;
pub mod pagination;

pub use cache::*;
pub use collections::*;
pub use error_codes::*;
pub use errors::*;
pub use pagination::*;
