//! Pagination and sorting options read from the raw query string.

use log::debug;

use crate::constants::{
    CODE_INVALID_PAGINATION, DEFAULT_PAGE_INDEX, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
    PARAM_PAGE_INDEX, PARAM_PAGE_SIZE, PARAM_SORT_BY, RESERVED_QUERY_KEYS,
};
use crate::errors::{ApiError, FieldErrors};

/// Sort direction of the single supported sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Descending only for `desc` (any case); everything else sorts ascending.
    pub fn parse(token: Option<&str>) -> Self {
        match token {
            Some(token) if token.trim().eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// Page request: zero-based page index, clamped page size and an optional
/// `field.direction` sort expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationRequest {
    page_index: i64,
    page_size: i64,
    sort_by: Option<String>,
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            page_index: DEFAULT_PAGE_INDEX,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: None,
        }
    }
}

impl PaginationRequest {
    #[cfg(test)]
    pub fn new(page_index: i64, page_size: i64, sort_by: Option<String>) -> Self {
        Self::default()
            .with_page_index(page_index)
            .with_page_size(page_size)
            .with_sort_by(sort_by)
    }

    /// Negative indexes are clamped to the first page.
    pub fn with_page_index(mut self, page_index: i64) -> Self {
        if page_index < 0 {
            debug!("Clamping negative page index {} to 0", page_index);
        }
        self.page_index = page_index.max(0);
        self
    }

    /// Page sizes are clamped into `[0, MAX_PAGE_SIZE]`.
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size.clamp(0, MAX_PAGE_SIZE);
        self
    }

    pub fn with_sort_by(mut self, sort_by: Option<String>) -> Self {
        self.sort_by = sort_by.filter(|value| !value.trim().is_empty());
        self
    }

    /// Build a page request from raw query pairs. Keys match case-insensitively;
    /// a non-integer `pageIndex` or `pageSize` is a validation failure.
    pub fn from_query(params: &[(String, String)]) -> Result<Self, ApiError> {
        let mut request = Self::default();
        let mut errors = FieldErrors::new();

        for (key, value) in params {
            if key.eq_ignore_ascii_case(PARAM_PAGE_INDEX) {
                match parse_integer(value) {
                    Some(page_index) => request = request.with_page_index(page_index),
                    None => push_error(&mut errors, PARAM_PAGE_INDEX, value),
                }
            } else if key.eq_ignore_ascii_case(PARAM_PAGE_SIZE) {
                match parse_integer(value) {
                    Some(page_size) => request = request.with_page_size(page_size),
                    None => push_error(&mut errors, PARAM_PAGE_SIZE, value),
                }
            } else if key.eq_ignore_ascii_case(PARAM_SORT_BY) {
                request = request.with_sort_by(Some(value.clone()));
            }
        }

        if errors.is_empty() {
            Ok(request)
        } else {
            Err(ApiError::ValidationError {
                code: CODE_INVALID_PAGINATION.to_string(),
                errors,
            })
        }
    }

    pub fn page_index(&self) -> i64 {
        self.page_index
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn sort_by(&self) -> Option<&str> {
        self.sort_by.as_deref()
    }

    /// Split `sortBy` into its field token and direction.
    pub fn sort_parts(&self) -> Option<(&str, SortDirection)> {
        let sort_by = self.sort_by.as_deref()?;
        let mut parts = sort_by.split('.');
        let field = parts.next()?.trim();
        Some((field, SortDirection::parse(parts.next())))
    }

    /// Number of records preceding the requested page, capped so it still
    /// fits the store's signed skip.
    pub fn offset(&self) -> u64 {
        (self.page_index as u64)
            .saturating_mul(self.page_size as u64)
            .min(i64::MAX as u64)
    }

    pub fn limit(&self) -> u64 {
        self.page_size as u64
    }
}

/// Whether a query key drives pagination or sorting rather than filtering.
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_QUERY_KEYS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(key))
}

fn parse_integer(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

fn push_error(errors: &mut FieldErrors, field: &str, value: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(format!("The value '{}' is not valid for {}.", value, field));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let request = PaginationRequest::from_query(&[]).unwrap();
        assert_eq!(request.page_index(), 0);
        assert_eq!(request.page_size(), 10);
        assert_eq!(request.sort_by(), None);
    }

    #[test]
    fn test_page_size_is_clamped_to_maximum() {
        let request = PaginationRequest::from_query(&params(&[("pageSize", "1000")])).unwrap();
        assert_eq!(request.page_size(), 50);

        let request = PaginationRequest::from_query(&params(&[("pageSize", "5")])).unwrap();
        assert_eq!(request.page_size(), 5);
    }

    #[test]
    fn test_negative_values_are_clamped() {
        let request =
            PaginationRequest::from_query(&params(&[("pageIndex", "-3"), ("pageSize", "-1")]))
                .unwrap();
        assert_eq!(request.page_index(), 0);
        assert_eq!(request.page_size(), 0);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_keys_match_case_insensitively() {
        let request = PaginationRequest::from_query(&params(&[
            ("PAGEINDEX", "2"),
            ("pagesize", "20"),
            ("SortBy", "name.desc"),
        ]))
        .unwrap();
        assert_eq!(request.page_index(), 2);
        assert_eq!(request.page_size(), 20);
        assert_eq!(request.offset(), 40);
        assert_eq!(request.sort_parts(), Some(("name", SortDirection::Desc)));
    }

    #[test]
    fn test_non_integer_values_are_rejected() {
        let err = PaginationRequest::from_query(&params(&[("pageIndex", "two"), ("pageSize", "x")]))
            .unwrap_err();
        match err {
            ApiError::ValidationError { code, errors } => {
                assert_eq!(code, "INVALID_PAGINATION");
                assert_eq!(
                    errors["pageIndex"],
                    vec!["The value 'two' is not valid for pageIndex."]
                );
                assert!(errors.contains_key("pageSize"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_huge_page_index_offset_fits_signed_skip() {
        let request = PaginationRequest::from_query(&params(&[
            ("pageIndex", "9223372036854775807"),
            ("pageSize", "50"),
        ]))
        .unwrap();
        assert_eq!(request.offset(), i64::MAX as u64);
        assert!(i64::try_from(request.offset()).is_ok());
    }

    #[test]
    fn test_sort_parts() {
        let request = PaginationRequest::new(0, 10, Some("name".to_string()));
        assert_eq!(request.sort_parts(), Some(("name", SortDirection::Asc)));

        let request = PaginationRequest::new(0, 10, Some("id.DESC".to_string()));
        assert_eq!(request.sort_parts(), Some(("id", SortDirection::Desc)));

        let request = PaginationRequest::new(0, 10, Some("id.sideways".to_string()));
        assert_eq!(request.sort_parts(), Some(("id", SortDirection::Asc)));

        let request = PaginationRequest::new(0, 10, Some("  ".to_string()));
        assert_eq!(request.sort_parts(), None);
    }

    #[test]
    fn test_reserved_keys() {
        assert!(is_reserved_key("pageIndex"));
        assert!(is_reserved_key("PAGESIZE"));
        assert!(is_reserved_key("sortby"));
        assert!(!is_reserved_key("name"));
    }
}
