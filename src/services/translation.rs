//! Translation service
//!
//! Orchestrates writes across the repository and the export cache, and serves
//! exports cache-through.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::cache::{ExportCache, export_cache_key, invalidation_keys};
use crate::config::defaults::{DEFAULT_PER_PAGE, MAX_PER_PAGE};
use crate::errors::{AppError, AppResult};
use crate::models::{
    ExportPayload, Translation, TranslationCreateRequest, TranslationSearchFilters,
    TranslationUpdateRequest, validate_scope,
};
use crate::repositories::{PaginatedResult, TranslationRepository};

/// Service for managing translations and their cached exports
pub struct TranslationService {
    repository: Arc<dyn TranslationRepository>,
    cache: Arc<dyn ExportCache>,
    export_ttl: Duration,
}

impl TranslationService {
    pub fn new(
        repository: Arc<dyn TranslationRepository>,
        cache: Arc<dyn ExportCache>,
        export_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            export_ttl,
        }
    }

    /// List translations newest first; `per_page` defaults to 10 and is clamped to 1..=100
    pub async fn list(
        &self,
        page: Option<u64>,
        per_page: Option<u64>,
    ) -> AppResult<PaginatedResult<Translation>> {
        let page = page.unwrap_or(1).max(1);
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);

        Ok(self.repository.list_page(page, per_page).await?)
    }

    pub async fn create(&self, request: TranslationCreateRequest) -> AppResult<Translation> {
        request.validate()?;
        info!(
            "Creating translation: {} ({})",
            request.key, request.locale
        );

        let translation = self.repository.create(request).await?;

        self.invalidate(invalidation_keys(&translation.locale, &translation.tag_set()))
            .await;

        info!(
            "Successfully created translation: {} ({}) id={}",
            translation.key, translation.locale, translation.id
        );
        Ok(translation)
    }

    pub async fn get(&self, id: i32) -> AppResult<Translation> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("translation", id))
    }

    /// Apply a partial update, invalidating exports for both the old and new scope
    pub async fn update(
        &self,
        id: i32,
        request: TranslationUpdateRequest,
    ) -> AppResult<Translation> {
        request.validate()?;
        info!("Updating translation: {}", id);

        let previous = self.get(id).await?;
        let updated = self.repository.update(id, request).await?;

        let mut keys = invalidation_keys(&previous.locale, &previous.tag_set());
        keys.extend(invalidation_keys(&updated.locale, &updated.tag_set()));
        self.invalidate(keys).await;

        info!(
            "Successfully updated translation: {} ({}) id={}",
            updated.key, updated.locale, updated.id
        );
        Ok(updated)
    }

    /// Delete a translation; `Ok(false)` when the id does not exist
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        info!("Deleting translation: {}", id);

        let Some(previous) = self.repository.find_by_id(id).await? else {
            debug!("Translation {} not found, nothing to delete", id);
            return Ok(false);
        };

        let deleted = self.repository.delete(id).await?;
        if deleted {
            self.invalidate(invalidation_keys(&previous.locale, &previous.tag_set()))
                .await;
            info!("Translation {} deleted successfully", id);
        }
        Ok(deleted)
    }

    /// Search translations; tags use intersection semantics
    pub async fn search(&self, filters: TranslationSearchFilters) -> AppResult<Vec<Translation>> {
        filters.validate()?;
        debug!("Searching translations: {:?}", filters);
        Ok(self.repository.search(filters).await?)
    }

    /// Export translations grouped by locale; tags use union semantics
    ///
    /// Results are cached per `(locale, tag set)` for the configured TTL.
    pub async fn export(
        &self,
        locale: Option<String>,
        tags: BTreeSet<String>,
    ) -> AppResult<Arc<ExportPayload>> {
        let locale = locale.filter(|l| !l.trim().is_empty());
        validate_scope(locale.as_deref(), &tags)?;
        let key = export_cache_key(locale.as_deref(), &tags);

        match self.cache.get(&key).await {
            Ok(Some(payload)) => {
                debug!("Export cache hit: {}", key);
                return Ok(payload);
            }
            Ok(None) => debug!("Export cache miss: {}", key),
            Err(e) => warn!("Export cache lookup failed for {}: {}", key, e),
        }

        let rows = self.repository.export_rows(locale.clone(), tags).await?;
        let payload = Arc::new(ExportPayload::from_rows(rows, locale.as_deref()));

        if let Err(e) = self
            .cache
            .put(key.clone(), payload.clone(), self.export_ttl)
            .await
        {
            warn!("Failed to cache export {}: {}", key, e);
        }

        Ok(payload)
    }

    // The write is already committed; a failed invalidation only leaves an
    // entry that expires with its TTL.
    async fn invalidate(&self, keys: Vec<String>) {
        let keys: BTreeSet<String> = keys.into_iter().collect();
        for key in keys {
            match self.cache.invalidate(&key).await {
                Ok(()) => debug!("Invalidated export cache key: {}", key),
                Err(e) => error!("Failed to invalidate export cache key {}: {}", key, e),
            }
        }
    }
}
