//! Output cache constants.

/// Tag shared by every cached genre response; evicted on each genre write.
pub const GENRES_CACHE_TAG: &str = "genres";

/// Default lifetime of a cached response, in seconds.
pub const DEFAULT_CACHE_EXPIRATION_SECS: u64 = 60;
