//! Pagination constants for list endpoints.

/// Default number of items per page when not specified in the request.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum allowed items per page to prevent excessive data retrieval.
pub const MAX_PAGE_SIZE: i64 = 50;

/// Default page index. Pages are zero-based.
pub const DEFAULT_PAGE_INDEX: i64 = 0;

pub const PARAM_PAGE_INDEX: &str = "pageIndex";
pub const PARAM_PAGE_SIZE: &str = "pageSize";
pub const PARAM_SORT_BY: &str = "sortBy";

/// Query keys that drive pagination and sorting and are never treated as filters.
pub const RESERVED_QUERY_KEYS: [&str; 3] = [PARAM_PAGE_INDEX, PARAM_PAGE_SIZE, PARAM_SORT_BY];

/// Response header carrying the number of records that matched the filters.
pub const TOTAL_RECORDS_COUNT_HEADER: &str = "total-records-count";
