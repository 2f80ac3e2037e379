//! Middleware configuration for the HTTP server.

pub mod cors;

pub use cors::build_cors;
