//! MongoDB collection names.

pub const COLLECTION_GENRES: &str = "genres";

/// Holds one sequence document per collection that uses integer identities.
pub const COLLECTION_COUNTERS: &str = "counters";
