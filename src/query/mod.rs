//! Generic query shaping for list endpoints.
//!
//! Turns raw query-string parameters into filters, a single sort key and a
//! page window over any [`Queryable`], returning the page query together with
//! the number of records that matched the filters.

pub mod fields;
#[cfg(test)]
pub mod memory;
pub mod pagination;
pub mod shaper;

pub use fields::*;
pub use pagination::*;
pub use shaper::*;
