//! Genre service for listing, reading, creating, replacing and deleting genres.

use std::sync::Arc;

use log::{debug, info, warn};
use mongodb::Database;

use crate::constants::{CODE_GENRE_NOT_FOUND, ERR_GENRE_NOT_FOUND};
use crate::errors::ApiError;
use crate::models::{GenreCreationRequest, GenreResponse};
use crate::query::{shape, PaginationRequest, Queryable};
use crate::repositories::{GenreRepository, GenreStore};

pub struct GenreService<R: GenreStore = GenreRepository> {
    repository: Arc<R>,
}

impl GenreService<GenreRepository> {
    pub fn new(db: &Database) -> Self {
        Self::with_repository(GenreRepository::new(db))
    }
}

impl<R: GenreStore> GenreService<R> {
    pub fn with_repository(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Get the underlying repository (for startup tasks such as indexing).
    pub fn repository(&self) -> Arc<R> {
        Arc::clone(&self.repository)
    }

    /// One page of genres matching the query-string filters, plus the number
    /// of genres that matched before paging.
    pub async fn list(
        &self,
        params: &[(String, String)],
        pagination: &PaginationRequest,
    ) -> Result<(Vec<GenreResponse>, u64), ApiError> {
        let shaped = shape(self.repository.query(), params, pagination).await?;
        let genres = shaped.query.fetch().await?;

        debug!(
            "Fetched {} genres (page {}, size {}, sort {:?}) of {} matching",
            genres.len(),
            pagination.page_index(),
            pagination.page_size(),
            pagination.sort_by(),
            shaped.total_records
        );

        Ok((
            genres.into_iter().map(GenreResponse::from).collect(),
            shaped.total_records,
        ))
    }

    pub async fn get(&self, id: i32) -> Result<Option<GenreResponse>, ApiError> {
        debug!("Fetching genre by ID: {}", id);
        Ok(self
            .repository
            .find_by_id(id)
            .await?
            .map(GenreResponse::from))
    }

    /// Persist a new genre. The request must already be validated.
    pub async fn create(&self, req: GenreCreationRequest) -> Result<GenreResponse, ApiError> {
        let id = self.repository.next_id().await?;
        let genre = req.into_genre(id);

        self.repository.insert(&genre).await?;
        info!("Created genre {} ({})", genre.id, genre.name);

        Ok(genre.into())
    }

    /// Replace the genre stored under `id`. The request must already be validated.
    pub async fn update(&self, id: i32, req: GenreCreationRequest) -> Result<(), ApiError> {
        let genre = req.into_genre(id);

        if self.repository.replace(&genre).await? == 0 {
            warn!("Update failed: Genre not found with id: {}", id);
            return Err(ApiError::not_found(CODE_GENRE_NOT_FOUND, ERR_GENRE_NOT_FOUND));
        }

        info!("Updated genre {} ({})", id, genre.name);
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        if self.repository.delete(id).await? == 0 {
            warn!("Delete failed: Genre not found with id: {}", id);
            return Err(ApiError::not_found(CODE_GENRE_NOT_FOUND, ERR_GENRE_NOT_FOUND));
        }

        info!("Deleted genre {}", id);
        Ok(())
    }
}
