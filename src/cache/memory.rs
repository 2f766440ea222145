//! In-process export cache backed by an LRU map

use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use super::ExportCache;
use crate::errors::{AppError, AppResult};
use crate::models::ExportPayload;

struct CacheEntry {
    value: Arc<ExportPayload>,
    expires_at: Instant,
}

/// Bounded, TTL-aware export cache shared across requests
#[derive(Clone)]
pub struct MemoryExportCache {
    entries: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl MemoryExportCache {
    pub fn new(capacity: usize) -> AppResult<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| AppError::configuration("export cache capacity must be at least 1"))?;

        Ok(Self {
            entries: Arc::new(RwLock::new(LruCache::new(capacity))),
        })
    }

    /// Number of entries currently held, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ExportCache for MemoryExportCache {
    async fn get(&self, key: &str) -> AppResult<Option<Arc<ExportPayload>>> {
        let mut entries = self.entries.write().await;

        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                return Ok(Some(entry.value.clone()));
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!("Export cache entry expired: {}", key);
            entries.pop(key);
        }
        Ok(None)
    }

    async fn put(&self, key: String, value: Arc<ExportPayload>, ttl: Duration) -> AppResult<()> {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.put(key, entry);
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> AppResult<()> {
        if self.entries.write().await.pop(key).is_some() {
            debug!("Invalidated export cache entry: {}", key);
        }
        Ok(())
    }
}

/// Cache that never stores anything; every export is a miss
#[derive(Debug, Clone, Copy, Default)]
pub struct NullExportCache;

#[async_trait]
impl ExportCache for NullExportCache {
    async fn get(&self, _key: &str) -> AppResult<Option<Arc<ExportPayload>>> {
        Ok(None)
    }

    async fn put(&self, _key: String, _value: Arc<ExportPayload>, _ttl: Duration) -> AppResult<()> {
        Ok(())
    }

    async fn invalidate(&self, _key: &str) -> AppResult<()> {
        Ok(())
    }
}
