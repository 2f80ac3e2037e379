//! Response models for API endpoints.

pub mod api;
pub mod genre;

pub use api::*;
pub use genre::*;
