//! Repository layer for database operations.
//!
//! This module provides a clean separation between business logic (services)
//! and database operations (repositories), and hosts the MongoDB rendition of
//! the query shaper's [`Queryable`](crate::query::Queryable).

pub mod genre_repository;
#[cfg(test)]
pub mod memory;
pub mod mongo_query;

pub use genre_repository::{GenreRepository, GenreStore};
pub use mongo_query::MongoQuery;
