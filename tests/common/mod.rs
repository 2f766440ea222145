//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use i18n_store::{
    cache::{ExportCache, MemoryExportCache},
    database::{Database, repositories::TranslationSeaOrmRepository},
    models::TranslationCreateRequest,
    services::TranslationService,
    web::{AppState, create_router},
};

/// In-memory database with migrations applied
pub async fn create_test_database() -> Database {
    Database::new_in_memory()
        .await
        .expect("Failed to create in-memory database")
}

pub async fn create_service_with_cache(cache: Arc<dyn ExportCache>) -> (Database, TranslationService) {
    let database = create_test_database().await;
    let repository = Arc::new(TranslationSeaOrmRepository::new(database.connection()));
    let service = TranslationService::new(repository, cache, Duration::from_secs(3600));
    (database, service)
}

pub async fn create_service() -> (Database, TranslationService) {
    create_service_with_cache(Arc::new(MemoryExportCache::new(64).unwrap())).await
}

pub async fn create_test_server() -> TestServer {
    let (database, service) = create_service().await;
    let app = create_router(AppState {
        translation_service: Arc::new(service),
        database,
    });
    TestServer::new(app).expect("Failed to start test server")
}

pub fn translation(key: &str, locale: &str, value: &str, tags: &[&str]) -> TranslationCreateRequest {
    TranslationCreateRequest {
        key: key.to_string(),
        locale: locale.to_string(),
        value: value.to_string(),
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
    }
}

pub fn tag_set(tags: &[&str]) -> std::collections::BTreeSet<String> {
    tags.iter().map(|t| t.to_string()).collect()
}
