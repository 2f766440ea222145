//! Export result caching
//!
//! Exports are memoized per `(locale, tag set)` scope. The service owns the
//! invalidation policy; implementations only store, fetch and drop entries.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::AppResult;
use crate::models::ExportPayload;

pub mod key;
pub mod memory;

pub use key::{EXPORT_CACHE_PREFIX, export_cache_key, invalidation_keys};
pub use memory::{MemoryExportCache, NullExportCache};

/// Storage for computed exports
///
/// Entries may disappear at any time; callers must treat a miss as the normal
/// case and recompute.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExportCache: Send + Sync {
    /// Fetch a live entry
    async fn get(&self, key: &str) -> AppResult<Option<Arc<ExportPayload>>>;

    /// Store an entry for `ttl`
    async fn put(&self, key: String, value: Arc<ExportPayload>, ttl: Duration) -> AppResult<()>;

    /// Drop an entry if present
    async fn invalidate(&self, key: &str) -> AppResult<()>;
}
