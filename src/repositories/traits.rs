//! Repository trait definitions
//!
//! This module defines the data access interface for translations, so the
//! service layer can be exercised against any storage backend.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeSet;
use utoipa::ToSchema;

use crate::errors::RepositoryResult;
use crate::models::{
    ExportRow, Translation, TranslationCreateRequest, TranslationSearchFilters,
    TranslationUpdateRequest,
};

/// Persistence operations for translations and their tags
///
/// Implementations must apply each write (translation row, tag
/// get-or-create, association rows) atomically.
#[async_trait]
pub trait TranslationRepository: Send + Sync {
    /// Create a translation and attach its tags
    ///
    /// # Arguments
    ///
    /// * `request` - Validated create request
    ///
    /// # Returns
    ///
    /// * `Ok(Translation)` - Created translation with generated id, timestamps and sorted tags
    /// * `Err(RepositoryError::ConstraintViolation)` - `(key, locale)` already exists
    /// * `Err(RepositoryError)` - Database error
    async fn create(&self, request: TranslationCreateRequest) -> RepositoryResult<Translation>;

    /// Apply a partial update
    ///
    /// # Arguments
    ///
    /// * `id` - The translation id
    /// * `request` - Fields to change; `tags` replaces the association set when present
    ///
    /// # Returns
    ///
    /// * `Ok(Translation)` - Updated translation
    /// * `Err(RepositoryError::RecordNotFound)` - Unknown id
    /// * `Err(RepositoryError::ConstraintViolation)` - New `(key, locale)` collides
    async fn update(
        &self,
        id: i32,
        request: TranslationUpdateRequest,
    ) -> RepositoryResult<Translation>;

    /// Delete a translation and its association rows
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Translation deleted
    /// * `Ok(false)` - No translation with that id
    /// * `Err(RepositoryError)` - Database error
    async fn delete(&self, id: i32) -> RepositoryResult<bool>;

    /// Find a translation by its id, including its tags
    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Translation>>;

    /// List translations newest first
    ///
    /// # Arguments
    ///
    /// * `page` - Page number (1-based, 0 is treated as 1)
    /// * `per_page` - Items per page, clamped to `1..=100`
    async fn list_page(
        &self,
        page: u64,
        per_page: u64,
    ) -> RepositoryResult<PaginatedResult<Translation>>;

    /// Search with AND-combined filters, ordered by key, capped at 1000 rows
    ///
    /// A translation matches the tag filter only if it carries every listed tag.
    async fn search(&self, filters: TranslationSearchFilters)
    -> RepositoryResult<Vec<Translation>>;

    /// Rows for an export, ordered by key
    ///
    /// A translation matches the tag filter if it carries any of the listed tags.
    /// An empty tag set disables the filter.
    async fn export_rows(
        &self,
        locale: Option<String>,
        tags: BTreeSet<String>,
    ) -> RepositoryResult<Vec<ExportRow>>;
}

/// Standard paginated result structure
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedResult<T> {
    /// The items for this page
    pub items: Vec<T>,
    /// Current page number (1-based)
    pub page: u64,
    /// Items per page
    pub per_page: u64,
    /// Total number of items across all pages
    pub total: u64,
    /// Total number of pages
    pub total_pages: u64,
    /// Whether there is a next page
    pub has_next: bool,
    /// Whether there is a previous page
    pub has_previous: bool,
}

impl<T> PaginatedResult<T> {
    /// Create a new paginated result
    pub fn new(items: Vec<T>, page: u64, per_page: u64, total: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };
        let has_next = page < total_pages;
        let has_previous = page > 1;

        Self {
            items,
            page,
            per_page,
            total,
            total_pages,
            has_next,
            has_previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_page_metadata() {
        let result = PaginatedResult::new(vec![1, 2, 3], 2, 3, 8);
        assert_eq!(result.total_pages, 3);
        assert!(result.has_next);
        assert!(result.has_previous);

        let last = PaginatedResult::new(vec![7, 8], 3, 3, 8);
        assert!(!last.has_next);

        let empty: PaginatedResult<i32> = PaginatedResult::new(vec![], 1, 10, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next);
        assert!(!empty.has_previous);
    }
}
