//! End-to-end behaviour of the translation service against SQLite
//!
//! Covers CRUD, the two tag matching modes, export grouping and the export
//! cache lifecycle.

mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use common::{create_service, create_service_with_cache, tag_set, translation};
use i18n_store::{
    AppError,
    cache::NullExportCache,
    models::{ExportPayload, TranslationSearchFilters, TranslationUpdateRequest},
};

fn keys_of(payload: &ExportPayload) -> Vec<String> {
    match payload {
        ExportPayload::Locale { translations, .. } => translations.keys().cloned().collect(),
        ExportPayload::Locales { locales } => {
            locales.values().flat_map(|m| m.keys().cloned()).collect()
        }
    }
}

#[tokio::test]
async fn test_create_then_get_returns_same_fields() {
    let (_db, service) = create_service().await;

    let created = service
        .create(translation("auth.login", "en", "Log in", &["web", "mobile"]))
        .await
        .unwrap();
    let fetched = service.get(created.id).await.unwrap();

    assert_eq!(fetched.key, "auth.login");
    assert_eq!(fetched.locale, "en");
    assert_eq!(fetched.value, "Log in");
    assert_eq!(fetched.tags, vec!["mobile", "web"]);
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn test_duplicate_key_locale_conflicts() {
    let (_db, service) = create_service().await;
    service
        .create(translation("auth.login", "en", "Log in", &[]))
        .await
        .unwrap();

    let err = service
        .create(translation("auth.login", "en", "Sign in", &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let (_db, service) = create_service().await;
    let err = service.get(12345).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_search_intersects_tags_and_export_unions_them() {
    let (_db, service) = create_service().await;
    service.create(translation("tagged.a", "en", "A", &["A"])).await.unwrap();
    service.create(translation("tagged.b", "en", "B", &["B"])).await.unwrap();
    service.create(translation("tagged.ab", "en", "AB", &["A", "B"])).await.unwrap();
    service.create(translation("untagged", "en", "-", &[])).await.unwrap();

    let found = service
        .search(TranslationSearchFilters {
            tags: tag_set(&["A", "B"]),
            ..Default::default()
        })
        .await
        .unwrap();
    let found: Vec<_> = found.into_iter().map(|t| t.key).collect();
    assert_eq!(found, vec!["tagged.ab"]);

    let exported = service
        .export(Some("en".to_string()), tag_set(&["A", "B"]))
        .await
        .unwrap();
    assert_eq!(keys_of(&exported), vec!["tagged.a", "tagged.ab", "tagged.b"]);

    let everything = service.export(Some("en".to_string()), BTreeSet::new()).await.unwrap();
    assert_eq!(everything.len(), 4);
}

#[tokio::test]
async fn test_search_filters_combine() {
    let (_db, service) = create_service().await;
    service.create(translation("auth.login", "en", "Log in", &["web"])).await.unwrap();
    service.create(translation("auth.login", "fr", "Connexion", &["web"])).await.unwrap();
    service.create(translation("auth.logout", "en", "Log out", &["mobile"])).await.unwrap();

    let results = service
        .search(TranslationSearchFilters {
            key: Some("auth".to_string()),
            locale: Some("en".to_string()),
            content: Some("Log".to_string()),
            tags: tag_set(&["web"]),
        })
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].key, "auth.login");
    assert_eq!(results[0].locale, "en");

    // No filters returns everything ordered by key then locale
    let all = service.search(TranslationSearchFilters::default()).await.unwrap();
    let pairs: Vec<_> = all.iter().map(|t| (t.key.as_str(), t.locale.as_str())).collect();
    assert_eq!(
        pairs,
        vec![("auth.login", "en"), ("auth.login", "fr"), ("auth.logout", "en")]
    );
}

#[tokio::test]
async fn test_export_of_empty_locale_is_grouped_and_empty() {
    let (_db, service) = create_service().await;
    service.create(translation("a", "en", "A", &[])).await.unwrap();

    let payload = service.export(Some("de".to_string()), BTreeSet::new()).await.unwrap();
    assert_eq!(
        serde_json::to_value(payload.as_ref()).unwrap(),
        serde_json::json!({"locales": {}})
    );
}

#[tokio::test]
async fn test_locale_change_moves_translation_between_exports() {
    let (_db, service) = create_service().await;
    let created = service.create(translation("greeting", "en", "Hello", &[])).await.unwrap();

    let en_before = service.export(Some("en".to_string()), BTreeSet::new()).await.unwrap();
    assert_eq!(en_before.len(), 1);
    let fr_before = service.export(Some("fr".to_string()), BTreeSet::new()).await.unwrap();
    assert!(fr_before.is_empty());

    service
        .update(
            created.id,
            TranslationUpdateRequest {
                locale: Some("fr".to_string()),
                value: Some("Bonjour".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let en_after = service.export(Some("en".to_string()), BTreeSet::new()).await.unwrap();
    assert!(en_after.is_empty());
    let fr_after = service.export(Some("fr".to_string()), BTreeSet::new()).await.unwrap();
    assert_eq!(
        serde_json::to_value(fr_after.as_ref()).unwrap(),
        serde_json::json!({"locale": "fr", "translations": {"greeting": "Bonjour"}})
    );
}

#[tokio::test]
async fn test_repeated_exports_are_cached_until_a_write() {
    let (_db, service) = create_service().await;
    service.create(translation("a", "en", "A", &["web"])).await.unwrap();

    let first = service.export(Some("en".to_string()), tag_set(&["web"])).await.unwrap();
    let second = service.export(Some("en".to_string()), tag_set(&["web"])).await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    service.create(translation("b", "en", "B", &["web"])).await.unwrap();

    let third = service.export(Some("en".to_string()), tag_set(&["web"])).await.unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(third.len(), 2);
}

#[tokio::test]
async fn test_delete_invalidates_export() {
    let (_db, service) = create_service().await;
    let created = service.create(translation("a", "en", "A", &[])).await.unwrap();

    assert_eq!(service.export(None, BTreeSet::new()).await.unwrap().len(), 1);
    assert!(service.delete(created.id).await.unwrap());
    assert!(service.export(None, BTreeSet::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_exports_work_without_a_cache() {
    let (_db, service) = create_service_with_cache(Arc::new(NullExportCache)).await;
    service.create(translation("a", "en", "A", &[])).await.unwrap();

    let first = service.export(None, BTreeSet::new()).await.unwrap();
    let second = service.export(None, BTreeSet::new()).await.unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_page_size_is_capped() {
    let (_db, service) = create_service().await;
    for i in 0..105 {
        service
            .create(translation(&format!("key.{i:03}"), "en", "v", &[]))
            .await
            .unwrap();
    }

    let page = service.list(Some(1), Some(250)).await.unwrap();
    assert_eq!(page.per_page, 100);
    assert_eq!(page.items.len(), 100);
    assert_eq!(page.total, 105);
    assert_eq!(page.total_pages, 2);

    let second = service.list(Some(2), Some(250)).await.unwrap();
    assert_eq!(second.items.len(), 5);
}

#[tokio::test]
async fn test_delete_nonexistent_returns_false() {
    let (_db, service) = create_service().await;
    assert!(!service.delete(999).await.unwrap());
}

#[tokio::test]
async fn test_update_tags_replaces_and_clears() {
    let (_db, service) = create_service().await;
    let created = service
        .create(translation("a", "en", "A", &["web", "mobile"]))
        .await
        .unwrap();

    let updated = service
        .update(
            created.id,
            TranslationUpdateRequest {
                tags: Some(vec!["mobile".to_string(), "desktop".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.tags, vec!["desktop", "mobile"]);

    let web = service
        .search(TranslationSearchFilters {
            tags: tag_set(&["web"]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(web.is_empty());

    let cleared = service
        .update(
            created.id,
            TranslationUpdateRequest {
                tags: Some(Vec::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(cleared.tags.is_empty());
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let (_db, service) = create_service().await;
    let err = service
        .update(
            77,
            TranslationUpdateRequest {
                value: Some("x".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_search_is_capped_at_one_thousand_rows() {
    let (_db, service) = create_service().await;
    for i in 0..1005 {
        service
            .create(translation(&format!("bulk.{i:04}"), "en", "v", &[]))
            .await
            .unwrap();
    }

    let results = service
        .search(TranslationSearchFilters {
            key: Some("bulk.".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(results.len(), 1000);
    assert_eq!(results[0].key, "bulk.0000");
}
