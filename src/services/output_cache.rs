//! Tag-scoped output cache for GET responses.
//!
//! Responses are cached by request URI for a fixed lifetime and grouped under
//! tags, so a write can drop every cached response for a resource at once.
//!
//! Every eviction bumps the tag's generation. A reader takes a
//! [`CacheTicket`] before it reads the store, and `insert` drops the response
//! if any of its tags was evicted in the meantime.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::http::header::ContentType;
use actix_web::web::Bytes;
use actix_web::HttpResponse;
use dashmap::DashMap;
use log::{debug, info};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::errors::ApiError;

/// A successful JSON response captured for replay.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    body: Bytes,
    headers: Vec<(String, String)>,
}

impl CachedResponse {
    /// Serialize `value` as the JSON body of a 200 response.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ApiError> {
        Ok(Self {
            body: Bytes::from(serde_json::to_vec(value)?),
            headers: Vec::new(),
        })
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn to_http_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::Ok();
        builder.content_type(ContentType::json());
        for (name, value) in &self.headers {
            builder.insert_header((name.as_str(), value.as_str()));
        }
        builder.body(self.body.clone())
    }
}

/// Tag generations observed before a response was produced.
#[derive(Debug, Clone)]
pub struct CacheTicket {
    generations: Vec<(String, u64)>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    response: CachedResponse,
    tags: Vec<String>,
    expires_at: Instant,
}

/// Thread-safe output cache shared by all workers.
#[derive(Clone)]
pub struct OutputCache {
    /// Request key -> cached response
    entries: Arc<DashMap<String, CacheEntry>>,
    /// Tag -> request keys cached under it
    tags: Arc<DashMap<String, HashSet<String>>>,
    /// Tag -> number of evictions so far
    generations: Arc<DashMap<String, u64>>,
    expiration: Duration,
    last_cleanup: Arc<RwLock<Instant>>,
}

impl OutputCache {
    /// Create an empty cache whose entries live for `expiration`.
    pub fn new(expiration: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            tags: Arc::new(DashMap::new()),
            generations: Arc::new(DashMap::new()),
            expiration,
            last_cleanup: Arc::new(RwLock::new(Instant::now())),
        }
    }

    /// Look up a live response. Expired entries are dropped on read.
    pub fn get(&self, key: &str) -> Option<CachedResponse> {
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > Instant::now() {
                debug!("Output cache hit: {}", key);
                return Some(entry.response.clone());
            }
            drop(entry); // Release the read lock before removing
            self.entries.remove(key);
        }

        None
    }

    /// Record the current generation of every tag. Take the ticket before
    /// reading the store.
    pub fn ticket(&self, tags: &[&str]) -> CacheTicket {
        CacheTicket {
            generations: tags
                .iter()
                .map(|tag| (tag.to_string(), self.generation(tag)))
                .collect(),
        }
    }

    fn generation(&self, tag: &str) -> u64 {
        self.generations.get(tag).map_or(0, |generation| *generation)
    }

    fn is_current(&self, ticket: &CacheTicket) -> bool {
        ticket
            .generations
            .iter()
            .all(|(tag, generation)| self.generation(tag) == *generation)
    }

    /// Cache `response` under `key`, indexed under the ticket's tags.
    ///
    /// Returns false, caching nothing, when a tag was evicted after the
    /// ticket was taken.
    pub async fn insert(
        &self,
        key: &str,
        ticket: &CacheTicket,
        response: CachedResponse,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!("Output cache skipped stale response: {}", key);
            return false;
        }

        let tags: Vec<String> = ticket
            .generations
            .iter()
            .map(|(tag, _)| tag.clone())
            .collect();
        let entry = CacheEntry {
            response,
            tags: tags.clone(),
            expires_at: Instant::now() + self.expiration,
        };
        self.entries.insert(key.to_string(), entry);

        for tag in &tags {
            self.tags
                .entry(tag.clone())
                .or_default()
                .insert(key.to_string());
        }

        // An eviction that ran between the check above and indexing the key
        // has already bumped the generation.
        if !self.is_current(ticket) {
            self.entries.remove(key);
            debug!("Output cache dropped response evicted while storing: {}", key);
            return false;
        }
        debug!("Output cache stored: {} (tags: {:?})", key, tags);

        self.maybe_cleanup().await;
        true
    }

    /// Remove every entry cached under `tag`. Returns how many were removed.
    pub fn evict_by_tag(&self, tag: &str) -> usize {
        *self.generations.entry(tag.to_string()).or_insert(0) += 1;

        let Some((_, keys)) = self.tags.remove(tag) else {
            return 0;
        };

        let mut removed = 0;
        for key in keys {
            let Some((_, entry)) = self.entries.remove(&key) else {
                continue;
            };
            removed += 1;

            for other in entry.tags.iter().filter(|other| other.as_str() != tag) {
                if let Some(mut other_keys) = self.tags.get_mut(other) {
                    other_keys.remove(&key);
                }
            }
        }

        info!("Output cache evicted {} entries for tag '{}'", removed, tag);
        removed
    }

    /// Clean up expired entries if enough time has passed since last cleanup.
    async fn maybe_cleanup(&self) {
        const CLEANUP_INTERVAL: Duration = Duration::from_secs(300); // 5 minutes

        let should_cleanup = {
            let last = self.last_cleanup.read().await;
            last.elapsed() >= CLEANUP_INTERVAL
        };

        if should_cleanup {
            let mut last = self.last_cleanup.write().await;
            // Double-check after acquiring write lock
            if last.elapsed() >= CLEANUP_INTERVAL {
                self.cleanup();
                *last = Instant::now();
            }
        }
    }

    /// Remove all expired entries and forget tags that no longer point anywhere.
    fn cleanup(&self) {
        let now = Instant::now();
        let before_count = self.entries.len();

        self.entries.retain(|_, entry| entry.expires_at > now);
        self.tags.retain(|_, keys| {
            keys.retain(|key| self.entries.contains_key(key));
            !keys.is_empty()
        });

        let removed = before_count - self.entries.len();
        if removed > 0 {
            info!(
                "Output cache cleanup: removed {} expired entries, {} remaining",
                removed,
                self.entries.len()
            );
        }
    }

    /// Get the current number of cached responses.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
