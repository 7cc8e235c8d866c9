//! In-memory response cache with time-to-live.
//!
//! Raw upstream JSON is cached, keyed by a fingerprint of the source and the
//! rounded request location (see `helpers::location_key`). Parsing happens on
//! every read, so the cache never holds derived values.

use moka::future::Cache;
use std::future::Future;
use std::time::Duration;

use crate::errors::AppError;

/// Upper bound on cached responses.
const MAX_ENTRIES: u64 = 1_000;

#[derive(Clone)]
pub struct ResponseCache {
    inner: Cache<String, serde_json::Value>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(ttl)
            .build();
        Self { inner }
    }

    pub async fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: String, value: serde_json::Value) {
        self.inner.insert(key, value).await;
    }

    /// Return the cached value for `key`, or run `fetch` and cache its result.
    /// Failed fetches are not cached.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<serde_json::Value, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<serde_json::Value, AppError>>,
    {
        if let Some(hit) = self.get(key).await {
            tracing::debug!("Cache hit for {}", key);
            return Ok(hit);
        }

        tracing::debug!("Cache miss for {}", key);
        let value = fetch().await?;
        self.insert(key.to_string(), value.clone()).await;
        Ok(value)
    }
}
