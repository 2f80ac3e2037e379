//! Genre repository for all MongoDB operations related to genres.
//!
//! Genres use integer identities, allocated from a per-collection sequence
//! document in the counters collection.

use std::future::Future;

use log::{debug, info};
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};

use crate::constants::{
    CODE_INTERNAL_ERROR, COLLECTION_COUNTERS, COLLECTION_GENRES, ERR_ID_ALLOCATION_FAILED,
};
use crate::errors::ApiError;
use crate::models::Genre;
use crate::query::Queryable;
use crate::repositories::MongoQuery;

/// Storage operations the genre service needs.
pub trait GenreStore: Send + Sync + 'static {
    type Query: Queryable<Item = Genre>;

    /// Unfiltered base query over all genres.
    fn query(&self) -> Self::Query;

    /// Allocate the next genre identifier.
    fn next_id(&self) -> impl Future<Output = Result<i32, ApiError>> + Send;

    fn insert(&self, genre: &Genre) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn find_by_id(
        &self,
        id: i32,
    ) -> impl Future<Output = Result<Option<Genre>, ApiError>> + Send;

    /// Replace a genre. Resolves to the number of matched genres.
    fn replace(&self, genre: &Genre) -> impl Future<Output = Result<u64, ApiError>> + Send;

    /// Delete a genre. Resolves to the number of deleted genres.
    fn delete(&self, id: i32) -> impl Future<Output = Result<u64, ApiError>> + Send;
}

/// Repository for genre-related database operations.
pub struct GenreRepository {
    collection: Collection<Genre>,
    counters: Collection<Document>,
}

impl GenreRepository {
    /// Create a new GenreRepository instance.
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_GENRES),
            counters: db.collection(COLLECTION_COUNTERS),
        }
    }

    /// Create database indexes for commonly queried fields.
    ///
    /// Called once during application startup. Clients filter and sort on
    /// `name`; `_id` is indexed by MongoDB already.
    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes for genres collection...");

        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .name("genres_name".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        info!("Database indexes created successfully");
        Ok(())
    }
}

impl GenreStore for GenreRepository {
    type Query = MongoQuery<Genre>;

    fn query(&self) -> MongoQuery<Genre> {
        MongoQuery::new(self.collection.clone())
    }

    /// Atomic `$inc` upsert on the genres counter document.
    async fn next_id(&self) -> Result<i32, ApiError> {
        let counter = self
            .counters
            .find_one_and_update(
                doc! { "_id": COLLECTION_GENRES },
                doc! { "$inc": { "seq": 1 } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| ApiError::internal(CODE_INTERNAL_ERROR, ERR_ID_ALLOCATION_FAILED))?;

        match counter.get("seq") {
            Some(Bson::Int32(seq)) => Ok(*seq),
            Some(Bson::Int64(seq)) => i32::try_from(*seq)
                .map_err(|_| ApiError::internal(CODE_INTERNAL_ERROR, ERR_ID_ALLOCATION_FAILED)),
            _ => Err(ApiError::internal(
                CODE_INTERNAL_ERROR,
                ERR_ID_ALLOCATION_FAILED,
            )),
        }
    }

    async fn insert(&self, genre: &Genre) -> Result<(), ApiError> {
        debug!("Repository: Inserting genre with ID: {}", genre.id);
        self.collection.insert_one(genre).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, ApiError> {
        debug!("Repository: Finding genre by ID: {}", id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn replace(&self, genre: &Genre) -> Result<u64, ApiError> {
        debug!("Repository: Replacing genre with ID: {}", genre.id);
        let result = self
            .collection
            .replace_one(doc! { "_id": genre.id }, genre)
            .await?;
        Ok(result.matched_count)
    }

    async fn delete(&self, id: i32) -> Result<u64, ApiError> {
        debug!("Repository: Deleting genre with ID: {}", id);
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }
}
