//! Cache/session store seam and the in-memory store used in development and tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),

    #[error("cache operation failed: {0}")]
    Operation(String),
}

/// Handle shared by every request served by a mode.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// `ttl` of `None` keeps the entry until it is deleted.
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), CacheError>;

    /// Returns whether an entry was removed.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;
}

/// Resolves the cache handle. Called once per mode start in production and
/// once per context build in development.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    async fn get_cache(&self) -> Result<Arc<dyn Cache>, CacheError>;
}

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<FxHashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), CacheError> {
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        let mut entries = self.entries.write().await;

        // Sweep expired entries so the map does not grow without bound
        if entries.len() > 10_000 {
            let now = Instant::now();
            entries.retain(|_, entry| entry.is_live(now));
        }

        entries.insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let now = Instant::now();
        let removed = self.entries.write().await.remove(key);
        Ok(removed.is_some_and(|entry| entry.is_live(now)))
    }
}

/// Hands out one shared [`MemoryCache`] on every call.
#[derive(Clone, Default)]
pub struct MemoryCacheProvider {
    cache: Arc<MemoryCache>,
}

impl MemoryCacheProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(cache: Arc<MemoryCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get_cache(&self) -> Result<Arc<dyn Cache>, CacheError> {
        Ok(self.cache.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = MemoryCache::new();
        cache.set("k", "v".to_string(), None).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v"));
        assert!(cache.delete("k").await.unwrap());
        assert!(!cache.delete("k").await.unwrap());
        assert!(cache.get("k").await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire() {
        let cache = MemoryCache::new();
        cache
            .set("short", "v".to_string(), Some(Duration::from_secs(5)))
            .await
            .unwrap();
        cache.set("long", "v".to_string(), None).await.unwrap();

        tokio::time::advance(Duration::from_secs(6)).await;

        assert!(cache.get("short").await.unwrap().is_none());
        assert!(cache.get("long").await.unwrap().is_some());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_provider_shares_one_instance() {
        let provider = MemoryCacheProvider::new();
        let first = provider.get_cache().await.unwrap();
        let second = provider.get_cache().await.unwrap();

        first.set("shared", "yes".to_string(), None).await.unwrap();
        assert_eq!(second.get("shared").await.unwrap().as_deref(), Some("yes"));
    }
}
