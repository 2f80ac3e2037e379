//! Data models organized by type.

pub mod genre;
pub mod requests;
pub mod responses;

pub use genre::*;
pub use requests::*;
pub use responses::*;
