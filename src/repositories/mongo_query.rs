//! MongoDB-backed [`Queryable`]: filters, sort and paging compile to BSON and
//! find options, executed only on `count` or `fetch`.

use futures::TryStreamExt;
use log::debug;
use mongodb::bson::{doc, Bson, Document, Regex};
use mongodb::Collection;
use serde::de::DeserializeOwned;

use crate::errors::ApiError;
use crate::query::{FieldFilter, Filterable, FilterOp, Queryable, SortDirection, SortOrder};

/// Lazily built query over a collection.
pub struct MongoQuery<T: Send + Sync> {
    collection: Collection<T>,
    filters: Vec<Document>,
    sort: Option<Document>,
    skip: u64,
    limit: Option<u64>,
}

impl<T: Send + Sync> MongoQuery<T> {
    /// Unfiltered, unordered query over every document in `collection`.
    pub fn new(collection: Collection<T>) -> Self {
        Self {
            collection,
            filters: Vec::new(),
            sort: None,
            skip: 0,
            limit: None,
        }
    }

    /// The combined filter document for every filter applied so far.
    pub fn filter_document(&self) -> Document {
        combine_filters(&self.filters)
    }
}

impl<T> Queryable for MongoQuery<T>
where
    T: Filterable + DeserializeOwned + Send + Sync,
{
    type Item = T;

    fn filter(mut self, filter: FieldFilter<T>) -> Self {
        self.filters.push(filter_to_document(&filter));
        self
    }

    fn order_by(mut self, sort: SortOrder<T>) -> Self {
        self.sort = Some(sort_to_document(&sort));
        self
    }

    fn skip(mut self, count: u64) -> Self {
        self.skip = count;
        self
    }

    fn take(mut self, count: u64) -> Self {
        self.limit = Some(count);
        self
    }

    async fn count(&self) -> Result<u64, ApiError> {
        let filter = self.filter_document();
        debug!("Counting {} with filter: {:?}", T::ENTITY_NAME, filter);
        Ok(self.collection.count_documents(filter).await?)
    }

    async fn fetch(self) -> Result<Vec<T>, ApiError> {
        // MongoDB treats a zero limit as "no limit".
        if self.limit == Some(0) {
            return Ok(Vec::new());
        }

        let filter = self.filter_document();
        debug!(
            "Fetching {} with filter: {:?}, sort: {:?}, skip: {}, limit: {:?}",
            T::ENTITY_NAME,
            filter,
            self.sort,
            self.skip,
            self.limit
        );

        let mut find = self.collection.find(filter).skip(self.skip);
        if let Some(sort) = self.sort {
            find = find.sort(sort);
        }
        if let Some(limit) = self.limit {
            find = find.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let cursor = find.await?;
        Ok(cursor.try_collect().await?)
    }
}

/// Compile one field filter to a match expression.
///
/// Substring values are regex-escaped so they match literally, ignoring
/// case. Non-string fields compare on their string form.
pub fn filter_to_document<E: 'static>(filter: &FieldFilter<E>) -> Document {
    let column = filter.field.column;
    match &filter.op {
        FilterOp::Contains(value) => doc! {
            column: {
                "$regex": Regex {
                    pattern: regex::escape(value),
                    options: "i".to_string(),
                }
            }
        },
        FilterOp::EqualsText(value) => doc! {
            "$expr": {
                "$eq": [ { "$toString": format!("${}", column) }, value.as_str() ]
            }
        },
    }
}

pub fn sort_to_document<E: 'static>(sort: &SortOrder<E>) -> Document {
    let order = match sort.direction {
        SortDirection::Asc => 1,
        SortDirection::Desc => -1,
    };
    doc! { sort.field.column: order }
}

/// AND together individual match expressions.
pub fn combine_filters(filters: &[Document]) -> Document {
    match filters {
        [] => doc! {},
        [single] => single.clone(),
        many => doc! {
            "$and": many.iter().cloned().map(Bson::Document).collect::<Vec<_>>()
        },
    }
}
