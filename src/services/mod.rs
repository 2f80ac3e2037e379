//! Business logic services.

pub mod genre_service;
pub mod output_cache;

pub use genre_service::GenreService;
pub use output_cache::{CachedResponse, OutputCache};
