//! HTTP request handlers organized by domain.

pub mod genre_handler;

pub use genre_handler::*;
