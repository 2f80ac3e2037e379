//! Request models for API endpoints.

pub mod genre;

pub use genre::*;
