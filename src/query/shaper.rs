//! Filter, count, sort and paginate a lazy query from raw query parameters.

use std::future::Future;

use log::debug;

use crate::errors::ApiError;
use crate::query::fields::{FieldDef, FieldKind, Filterable};
use crate::query::pagination::{is_reserved_key, PaginationRequest, SortDirection};

/// Predicate applied to one field.
pub enum FilterOp {
    /// Case-insensitive substring containment on a string field.
    Contains(String),
    /// Exact match against the string form of a non-string field.
    EqualsText(String),
}

pub struct FieldFilter<E: 'static> {
    pub field: &'static FieldDef<E>,
    pub op: FilterOp,
}

impl<E: 'static> FieldFilter<E> {
    /// Whether an in-memory entity satisfies this filter.
    #[cfg(test)]
    pub fn matches(&self, entity: &E) -> bool {
        let value = self.field.read(entity).to_string();
        match &self.op {
            FilterOp::Contains(needle) => {
                value.to_lowercase().contains(&needle.to_lowercase())
            }
            FilterOp::EqualsText(expected) => value == *expected,
        }
    }
}

pub struct SortOrder<E: 'static> {
    pub field: &'static FieldDef<E>,
    pub direction: SortDirection,
}

/// A composable, lazily executed query over one entity type.
///
/// Composition methods consume and return the query; nothing touches the
/// store until `count` or `fetch` is awaited.
pub trait Queryable: Sized {
    type Item: Filterable;

    fn filter(self, filter: FieldFilter<Self::Item>) -> Self;

    fn order_by(self, sort: SortOrder<Self::Item>) -> Self;

    fn skip(self, count: u64) -> Self;

    fn take(self, count: u64) -> Self;

    /// Number of matching records, without materializing them.
    fn count(&self) -> impl Future<Output = Result<u64, ApiError>> + Send;

    fn fetch(self) -> impl Future<Output = Result<Vec<Self::Item>, ApiError>> + Send;
}

/// Result of shaping: the page query plus the number of records that
/// matched the filters before sorting and paging.
pub struct Shaped<Q> {
    pub query: Q,
    pub total_records: u64,
}

/// Apply query-string filters, count the matches, then sort and paginate.
///
/// Unknown filter and sort keys are ignored. Blank filter values and the
/// reserved pagination keys never become filters.
pub async fn shape<Q: Queryable>(
    base: Q,
    params: &[(String, String)],
    pagination: &PaginationRequest,
) -> Result<Shaped<Q>, ApiError> {
    let mut query = base;

    for filter in build_filters::<Q::Item>(params) {
        query = query.filter(filter);
    }

    let total_records = query.count().await?;

    if let Some(sort) = build_sort::<Q::Item>(pagination) {
        query = query.order_by(sort);
    }

    let query = query.skip(pagination.offset()).take(pagination.limit());

    Ok(Shaped {
        query,
        total_records,
    })
}

/// Translate raw query pairs into field filters for `E`.
pub fn build_filters<E: Filterable>(params: &[(String, String)]) -> Vec<FieldFilter<E>> {
    let mut filters = Vec::new();

    for (key, value) in params {
        if is_reserved_key(key) || value.trim().is_empty() {
            continue;
        }

        let Some(field) = E::resolve_field(key) else {
            debug!("Ignoring filter '{}': no such field on {}", key, E::ENTITY_NAME);
            continue;
        };

        debug!("Filtering {} by {} = '{}'", E::ENTITY_NAME, field.name, value);
        let op = match field.kind {
            FieldKind::Text => FilterOp::Contains(value.clone()),
            FieldKind::Integer => FilterOp::EqualsText(value.clone()),
        };
        filters.push(FieldFilter { field, op });
    }

    filters
}

/// Resolve the `field.direction` sort expression, if any, for `E`.
pub fn build_sort<E: Filterable>(pagination: &PaginationRequest) -> Option<SortOrder<E>> {
    let (token, direction) = pagination.sort_parts()?;

    match E::resolve_field(token) {
        Some(field) => Some(SortOrder { field, direction }),
        None => {
            debug!("Ignoring sort '{}': no such field on {}", token, E::ENTITY_NAME);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genre;
    use crate::query::memory::MemoryQuery;

    fn genre(id: i32, name: &str) -> Genre {
        Genre {
            id,
            name: name.to_string(),
        }
    }

    fn sample() -> Vec<Genre> {
        vec![genre(1, "Drama"), genre(2, "Comedy"), genre(3, "Dramatic")]
    }

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    async fn run(rows: Vec<Genre>, pairs: &[(&str, &str)]) -> (Vec<Genre>, u64) {
        let params = params(pairs);
        let pagination = PaginationRequest::from_query(&params).unwrap();
        let shaped = shape(MemoryQuery::new(rows), &params, &pagination)
            .await
            .unwrap();
        (shaped.query.fetch().await.unwrap(), shaped.total_records)
    }

    fn names(rows: &[Genre]) -> Vec<&str> {
        rows.iter().map(|g| g.name.as_str()).collect()
    }

    #[actix_web::test]
    async fn test_substring_filter_keeps_insertion_order() {
        let (rows, total) = run(sample(), &[("name", "Dra"), ("pageSize", "10")]).await;
        assert_eq!(names(&rows), vec!["Drama", "Dramatic"]);
        assert_eq!(total, 2);
    }

    #[actix_web::test]
    async fn test_substring_filter_ignores_case() {
        let (rows, total) = run(sample(), &[("name", "dra"), ("pageSize", "10")]).await;
        assert_eq!(names(&rows), vec!["Drama", "Dramatic"]);
        assert_eq!(total, 2);

        let (rows, _) = run(sample(), &[("name", "MEDY")]).await;
        assert_eq!(names(&rows), vec!["Comedy"]);
    }

    #[test]
    fn test_lowercase_filter_matches_capitalized_rows() {
        let filters = build_filters::<Genre>(&params(&[("name", "dra")]));
        let matched: Vec<Genre> = sample()
            .into_iter()
            .filter(|row| filters.iter().all(|filter| filter.matches(row)))
            .collect();
        assert_eq!(names(&matched), vec!["Drama", "Dramatic"]);
    }

    #[actix_web::test]
    async fn test_filter_key_matches_case_insensitively() {
        let (rows, _) = run(sample(), &[("NAME", "Com")]).await;
        assert_eq!(names(&rows), vec!["Comedy"]);
    }

    #[actix_web::test]
    async fn test_integer_filter_is_exact_match_on_string_form() {
        let rows = vec![genre(1, "Drama"), genre(12, "Comedy"), genre(21, "Horror")];
        let (result, total) = run(rows.clone(), &[("id", "1")]).await;
        assert_eq!(names(&result), vec!["Drama"]);
        assert_eq!(total, 1);

        let (result, total) = run(rows, &[("id", "one")]).await;
        assert!(result.is_empty());
        assert_eq!(total, 0);
    }

    #[actix_web::test]
    async fn test_filters_combine_with_and() {
        let (rows, total) = run(sample(), &[("name", "Dra"), ("id", "3")]).await;
        assert_eq!(names(&rows), vec!["Dramatic"]);
        assert_eq!(total, 1);
    }

    #[actix_web::test]
    async fn test_unknown_and_blank_filters_are_ignored() {
        let (rows, total) = run(sample(), &[("title", "x"), ("name", "   ")]).await;
        assert_eq!(rows.len(), 3);
        assert_eq!(total, 3);
    }

    #[actix_web::test]
    async fn test_total_counts_filtered_set_not_page() {
        let rows: Vec<Genre> = (1..=30).map(|i| genre(i, &format!("Genre {}", i))).collect();
        let (page, total) = run(
            rows,
            &[("name", "Genre"), ("pageSize", "5"), ("pageIndex", "1")],
        )
        .await;
        assert_eq!(total, 30);
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].id, 6);
        assert_eq!(page[4].id, 10);
    }

    #[actix_web::test]
    async fn test_page_past_the_end_is_empty() {
        let (rows, total) = run(sample(), &[("pageIndex", "4")]).await;
        assert!(rows.is_empty());
        assert_eq!(total, 3);
    }

    #[actix_web::test]
    async fn test_page_size_is_capped() {
        let rows: Vec<Genre> = (1..=80).map(|i| genre(i, "Action")).collect();
        let (page, total) = run(rows, &[("pageSize", "1000")]).await;
        assert_eq!(page.len(), 50);
        assert_eq!(total, 80);
    }

    #[actix_web::test]
    async fn test_sort_descending() {
        let (rows, _) = run(sample(), &[("sortBy", "name.desc")]).await;
        assert_eq!(names(&rows), vec!["Dramatic", "Drama", "Comedy"]);

        let (rows, _) = run(sample(), &[("sortBy", "Name.DESC")]).await;
        assert_eq!(names(&rows), vec!["Dramatic", "Drama", "Comedy"]);
    }

    #[actix_web::test]
    async fn test_sort_defaults_to_ascending() {
        let (rows, _) = run(sample(), &[("sortBy", "name")]).await;
        assert_eq!(names(&rows), vec!["Comedy", "Drama", "Dramatic"]);

        let (rows, _) = run(sample(), &[("sortBy", "id.up")]).await;
        assert_eq!(names(&rows), vec!["Drama", "Comedy", "Dramatic"]);
    }

    #[actix_web::test]
    async fn test_unknown_sort_field_is_ignored() {
        let (rows, total) = run(sample(), &[("sortBy", "rating.desc")]).await;
        assert_eq!(rows.len(), 3);
        assert_eq!(total, 3);
    }

    #[actix_web::test]
    async fn test_sort_applies_before_paging() {
        let (rows, total) = run(
            sample(),
            &[("sortBy", "name.asc"), ("pageSize", "1"), ("pageIndex", "1")],
        )
        .await;
        assert_eq!(names(&rows), vec!["Drama"]);
        assert_eq!(total, 3);
    }

    #[test]
    fn test_reserved_keys_never_become_filters() {
        let filters = build_filters::<Genre>(&params(&[
            ("pageIndex", "1"),
            ("PageSize", "5"),
            ("sortby", "name"),
            ("name", "Dra"),
        ]));
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].field.name, "name");
    }
}
