//! In-memory genre store for service and handler tests.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;

use crate::errors::ApiError;
use crate::models::Genre;
use crate::query::memory::MemoryQuery;
use crate::repositories::GenreStore;

#[derive(Default)]
pub struct MemoryGenreStore {
    rows: Mutex<Vec<Genre>>,
    last_id: AtomicI32,
}

impl MemoryGenreStore {
    /// Store seeded with `names`, numbered from 1 in order.
    pub fn with_names(names: &[&str]) -> Self {
        let store = Self::default();
        {
            let mut rows = store.rows.lock().unwrap();
            for name in names {
                let id = store.last_id.fetch_add(1, Ordering::SeqCst) + 1;
                rows.push(Genre {
                    id,
                    name: name.to_string(),
                });
            }
        }
        store
    }

    pub fn names(&self) -> Vec<String> {
        let rows = self.rows.lock().unwrap();
        rows.iter().map(|genre| genre.name.clone()).collect()
    }
}

impl GenreStore for MemoryGenreStore {
    type Query = MemoryQuery<Genre>;

    fn query(&self) -> MemoryQuery<Genre> {
        MemoryQuery::new(self.rows.lock().unwrap().clone())
    }

    async fn next_id(&self) -> Result<i32, ApiError> {
        Ok(self.last_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn insert(&self, genre: &Genre) -> Result<(), ApiError> {
        self.rows.lock().unwrap().push(genre.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, ApiError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|genre| genre.id == id).cloned())
    }

    async fn replace(&self, genre: &Genre) -> Result<u64, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|row| row.id == genre.id) {
            Some(row) => {
                *row = genre.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i32) -> Result<u64, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|genre| genre.id != id);
        Ok((before - rows.len()) as u64)
    }
}
