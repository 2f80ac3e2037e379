//! Request validation helpers and custom validators.

pub mod common;
pub mod genre;

pub use common::*;
pub use genre::*;
