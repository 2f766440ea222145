//! Deterministic cache keys for export results

use std::collections::BTreeSet;

/// Key of the unscoped export (no locale, no tags)
pub const EXPORT_CACHE_PREFIX: &str = "translations_export";

/// Build the cache key for an export scope.
///
/// Tags come from a `BTreeSet`, so the same tag set always yields the same key
/// regardless of request order or duplicates. Locales cannot contain `:` and
/// tag names cannot contain `,`, which keeps distinct scopes from colliding.
pub fn export_cache_key(locale: Option<&str>, tags: &BTreeSet<String>) -> String {
    let mut key = EXPORT_CACHE_PREFIX.to_string();

    if let Some(locale) = locale {
        key.push_str(":locale=");
        key.push_str(locale);
    }

    if !tags.is_empty() {
        key.push_str(":tags=");
        key.push_str(&tags.iter().map(String::as_str).collect::<Vec<_>>().join(","));
    }

    key
}

/// Keys to drop after a write touching `locale` with `tags`
///
/// Covers the unscoped export, the locale-wide export and the exact
/// `(locale, tags)` export. Other tag combinations expire with their TTL.
pub fn invalidation_keys(locale: &str, tags: &BTreeSet<String>) -> Vec<String> {
    let mut keys = vec![
        export_cache_key(None, &BTreeSet::new()),
        export_cache_key(Some(locale), &BTreeSet::new()),
    ];
    if !tags.is_empty() {
        keys.push(export_cache_key(Some(locale), tags));
    }
    keys
}
