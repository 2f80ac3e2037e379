//! In-memory [`Queryable`] over a vector of entities, used to exercise the
//! shaper and the services without a database.

use crate::errors::ApiError;
use crate::query::{FieldFilter, Filterable, Queryable, SortDirection, SortOrder};

/// Mirrors the store semantics: filters narrow, ordering is stable,
/// skip/take page.
pub struct MemoryQuery<E: 'static> {
    rows: Vec<E>,
    filters: Vec<FieldFilter<E>>,
    sort: Option<SortOrder<E>>,
    skip: u64,
    take: Option<u64>,
}

impl<E: Filterable + Clone> MemoryQuery<E> {
    pub fn new(rows: Vec<E>) -> Self {
        Self {
            rows,
            filters: Vec::new(),
            sort: None,
            skip: 0,
            take: None,
        }
    }

    fn filtered(&self) -> Vec<E> {
        self.rows
            .iter()
            .filter(|row| self.filters.iter().all(|filter| filter.matches(row)))
            .cloned()
            .collect()
    }
}

impl<E> Queryable for MemoryQuery<E>
where
    E: Filterable + Clone + Send + Sync,
{
    type Item = E;

    fn filter(mut self, filter: FieldFilter<E>) -> Self {
        self.filters.push(filter);
        self
    }

    fn order_by(mut self, sort: SortOrder<E>) -> Self {
        self.sort = Some(sort);
        self
    }

    fn skip(mut self, count: u64) -> Self {
        self.skip = count;
        self
    }

    fn take(mut self, count: u64) -> Self {
        self.take = Some(count);
        self
    }

    async fn count(&self) -> Result<u64, ApiError> {
        Ok(self.filtered().len() as u64)
    }

    async fn fetch(self) -> Result<Vec<E>, ApiError> {
        let mut rows = self.filtered();
        if let Some(sort) = &self.sort {
            rows.sort_by(|a, b| {
                let ordering = sort.field.read(a).cmp(&sort.field.read(b));
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }
        let skip = usize::try_from(self.skip).unwrap_or(usize::MAX);
        let take = self
            .take
            .map_or(usize::MAX, |take| usize::try_from(take).unwrap_or(usize::MAX));
        Ok(rows.into_iter().skip(skip).take(take).collect())
    }
}
