use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use utoipa::{IntoParams, ToSchema};

use crate::errors::{AppError, AppResult};
use crate::utils::validation::{ValidationError, ValidationRule, Validator, describe_errors};

pub const MAX_KEY_LENGTH: usize = 255;
pub const MAX_LOCALE_LENGTH: usize = 10;
pub const MAX_TAG_LENGTH: usize = 50;

/// Locales are restricted to letters, digits, `-` and `_`
pub const LOCALE_PATTERN: &str = r"^[A-Za-z0-9_-]+$";

/// Separator for tag lists in query strings
pub const TAG_SEPARATOR: char = ',';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(description = "A localized string identified by its (key, locale) pair")]
pub struct Translation {
    pub id: i32,
    #[schema(example = "auth.login")]
    pub key: String,
    #[schema(example = "en")]
    pub locale: String,
    #[schema(example = "Log in")]
    pub value: String,
    /// Tag names in ascending order
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Translation {
    /// Tag names as a set, the form used for cache scoping
    pub fn tag_set(&self) -> BTreeSet<String> {
        self.tags.iter().cloned().collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TranslationCreateRequest {
    #[schema(example = "auth.login")]
    pub key: String,
    #[schema(example = "en")]
    pub locale: String,
    #[schema(example = "Log in")]
    pub value: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Partial update; absent fields are left untouched
///
/// `tags: Some(vec![])` clears every association, `tags: None` keeps them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TranslationUpdateRequest {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Independently optional search predicates, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationSearchFilters {
    /// Case-sensitive substring of the key
    pub key: Option<String>,
    /// Exact locale
    pub locale: Option<String>,
    /// Substring of the value
    pub content: Option<String>,
    /// Every listed tag must be attached
    pub tags: BTreeSet<String>,
}

impl TranslationSearchFilters {
    pub fn validate(&self) -> AppResult<()> {
        validate_scope(self.locale.as_deref(), &self.tags)
    }
}

/// Query string accepted by the search endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TranslationSearchQuery {
    /// Substring of the translation key
    pub key: Option<String>,
    /// Exact locale
    pub locale: Option<String>,
    /// Substring of the translation value
    pub content: Option<String>,
    /// Comma separated tag names; results carry all of them
    pub tags: Option<String>,
}

impl From<TranslationSearchQuery> for TranslationSearchFilters {
    fn from(query: TranslationSearchQuery) -> Self {
        Self {
            key: non_empty(query.key),
            locale: non_empty(query.locale),
            content: non_empty(query.content),
            tags: split_tag_list(query.tags.as_deref()),
        }
    }
}

/// Query string accepted by the export endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TranslationExportQuery {
    /// Restrict the export to one locale
    pub locale: Option<String>,
    /// Comma separated tag names; rows carrying any of them are exported
    pub tags: Option<String>,
}

impl TranslationExportQuery {
    pub fn locale(&self) -> Option<String> {
        non_empty(self.locale.clone())
    }

    pub fn tags(&self) -> BTreeSet<String> {
        split_tag_list(self.tags.as_deref())
    }
}

/// Query string accepted by the list endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TranslationListQuery {
    /// Page number, 1-based
    pub page: Option<u64>,
    /// Items per page, clamped to 1..=100
    pub per_page: Option<u64>,
}

/// A `(key, locale, value)` projection used to build exports
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct ExportRow {
    pub key: String,
    pub locale: String,
    pub value: String,
}

/// Exported translations grouped by locale
///
/// Serialized untagged, so clients see either
/// `{"locale": "en", "translations": {..}}` or `{"locales": {"en": {..}}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ExportPayload {
    Locale {
        locale: String,
        translations: BTreeMap<String, String>,
    },
    Locales {
        locales: BTreeMap<String, BTreeMap<String, String>>,
    },
}

impl ExportPayload {
    /// Group rows by locale and pick the single-locale form when the
    /// requested locale is present in the result.
    pub fn from_rows(rows: Vec<ExportRow>, requested_locale: Option<&str>) -> Self {
        let mut locales: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for row in rows {
            // Last write wins on a repeated key
            locales.entry(row.locale).or_default().insert(row.key, row.value);
        }

        match requested_locale {
            Some(locale) => match locales.remove(locale) {
                Some(translations) => Self::Locale {
                    locale: locale.to_string(),
                    translations,
                },
                None => Self::Locales { locales },
            },
            None => Self::Locales { locales },
        }
    }

    /// Number of key/value pairs across all locales
    pub fn len(&self) -> usize {
        match self {
            Self::Locale { translations, .. } => translations.len(),
            Self::Locales { locales } => locales.values().map(BTreeMap::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn tag_rule(tag: &str) -> Result<(), String> {
    if tag.contains(TAG_SEPARATOR) {
        return Err(format!("tag names must not contain '{TAG_SEPARATOR}'"));
    }
    Ok(())
}

/// Trim, drop blanks and de-duplicate a tag list
pub fn normalize_tags<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|tag| tag.as_ref().trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Split a comma separated `tags` query value
pub fn split_tag_list(raw: Option<&str>) -> BTreeSet<String> {
    raw.map(|value| normalize_tags(value.split(TAG_SEPARATOR)))
        .unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn validate_tags(tags: &[String]) -> Vec<String> {
    let mut messages = Vec::new();
    for (index, tag) in tags.iter().enumerate() {
        let field = format!("tags[{index}]");
        let mut data = HashMap::new();
        data.insert(field.clone(), Some(tag.trim().to_string()));

        let result = Validator::new()
            .rule(ValidationRule::required(field.as_str()))
            .rule(ValidationRule::max_length(field.as_str(), MAX_TAG_LENGTH))
            .rule(ValidationRule::custom(field.as_str(), tag_rule))
            .validate(&data);

        if let Err(errors) = result {
            messages.push(describe_errors(&errors));
        }
    }
    messages
}

/// Check a `(locale, tags)` filter against the formats writes accept
///
/// Export cache keys embed both values verbatim, so they must stay within
/// the locale pattern and tags must not contain the separator.
pub fn validate_scope(locale: Option<&str>, tags: &BTreeSet<String>) -> AppResult<()> {
    let mut data = HashMap::new();
    data.insert("locale".to_string(), locale.map(str::to_string));

    let result = Validator::new()
        .rule(ValidationRule::max_length("locale", MAX_LOCALE_LENGTH))
        .rule(ValidationRule::regex("locale", LOCALE_PATTERN))
        .validate(&data);

    let tags: Vec<String> = tags.iter().cloned().collect();
    finish(result, Some(&tags))
}

fn finish(field_errors: Result<(), Vec<ValidationError>>, tags: Option<&[String]>) -> AppResult<()> {
    let mut messages = Vec::new();
    if let Err(errors) = field_errors {
        messages.push(describe_errors(&errors));
    }
    if let Some(tags) = tags {
        messages.extend(validate_tags(tags));
    }

    if messages.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(messages.join("; ")))
    }
}

impl TranslationCreateRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut data = HashMap::new();
        data.insert("key".to_string(), Some(self.key.clone()));
        data.insert("locale".to_string(), Some(self.locale.clone()));
        data.insert("value".to_string(), Some(self.value.clone()));

        let result = Validator::new()
            .rule(ValidationRule::required("key"))
            .rule(ValidationRule::max_length("key", MAX_KEY_LENGTH))
            .rule(ValidationRule::required("locale"))
            .rule(ValidationRule::max_length("locale", MAX_LOCALE_LENGTH))
            .rule(ValidationRule::regex("locale", LOCALE_PATTERN))
            .rule(ValidationRule::required("value"))
            .validate(&data);

        finish(result, self.tags.as_deref())
    }

    pub fn tag_set(&self) -> BTreeSet<String> {
        self.tags.as_ref().map(normalize_tags).unwrap_or_default()
    }
}

impl TranslationUpdateRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut data = HashMap::new();
        data.insert("key".to_string(), self.key.clone());
        data.insert("locale".to_string(), self.locale.clone());
        data.insert("value".to_string(), self.value.clone());

        let result = Validator::new()
            .rule(ValidationRule::not_blank("key"))
            .rule(ValidationRule::max_length("key", MAX_KEY_LENGTH))
            .rule(ValidationRule::not_blank("locale"))
            .rule(ValidationRule::max_length("locale", MAX_LOCALE_LENGTH))
            .rule(ValidationRule::regex("locale", LOCALE_PATTERN))
            .rule(ValidationRule::not_blank("value"))
            .validate(&data);

        finish(result, self.tags.as_deref())
    }

    /// `None` when tags were not supplied, otherwise the replacement set
    pub fn tag_set(&self) -> Option<BTreeSet<String>> {
        self.tags.as_ref().map(normalize_tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const KEY_255: &str = "kkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkk";
    const KEY_256: &str = "kkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkk";
    const TAG_50: &str = "tttttttttttttttttttttttttttttttttttttttttttttttttt";
    const TAG_51: &str = "ttttttttttttttttttttttttttttttttttttttttttttttttttt";

    fn create(key: &str, locale: &str, value: &str, tags: Option<Vec<&str>>) -> TranslationCreateRequest {
        TranslationCreateRequest {
            key: key.to_string(),
            locale: locale.to_string(),
            value: value.to_string(),
            tags: tags.map(|t| t.into_iter().map(String::from).collect()),
        }
    }

    #[rstest]
    #[case::plain("auth.login", "en", "Log in", None)]
    #[case::region_locale("auth.login", "pt-BR", "Entrar", Some(vec!["web"]))]
    #[case::underscore_locale("auth.login", "zh_Hant", "登入", Some(vec![]))]
    #[case::max_key(KEY_255, "en", "x", None)]
    #[case::max_tag("a", "en", "x", Some(vec![TAG_50]))]
    fn accepts_valid_create_requests(
        #[case] key: &str,
        #[case] locale: &str,
        #[case] value: &str,
        #[case] tags: Option<Vec<&str>>,
    ) {
        assert!(create(key, locale, value, tags).validate().is_ok());
    }

    #[rstest]
    #[case::empty_key("", "en", "x", None)]
    #[case::long_key(KEY_256, "en", "x", None)]
    #[case::empty_locale("a", "", "x", None)]
    #[case::long_locale("a", "en-GB-oxendict", "x", None)]
    #[case::locale_with_space("a", "en gb", "x", None)]
    #[case::empty_value("a", "en", "", None)]
    #[case::blank_tag("a", "en", "x", Some(vec![" "]))]
    #[case::long_tag("a", "en", "x", Some(vec![TAG_51]))]
    #[case::comma_tag("a", "en", "x", Some(vec!["web,mobile"]))]
    fn rejects_invalid_create_requests(
        #[case] key: &str,
        #[case] locale: &str,
        #[case] value: &str,
        #[case] tags: Option<Vec<&str>>,
    ) {
        let err = create(key, locale, value, tags).validate().unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn update_allows_absent_fields_but_not_blank_ones() {
        assert!(TranslationUpdateRequest::default().validate().is_ok());

        let blank_locale = TranslationUpdateRequest {
            locale: Some(String::new()),
            ..Default::default()
        };
        assert!(blank_locale.validate().is_err());

        let new_locale = TranslationUpdateRequest {
            locale: Some("fr".to_string()),
            tags: Some(vec![]),
            ..Default::default()
        };
        assert!(new_locale.validate().is_ok());
        assert_eq!(new_locale.tag_set(), Some(BTreeSet::new()));
    }

    #[test]
    fn tag_lists_are_trimmed_and_deduplicated() {
        let request = create("a", "en", "x", Some(vec!["web", " mobile", "web", ""]));
        let tags: Vec<_> = request.tag_set().into_iter().collect();
        assert_eq!(tags, vec!["mobile", "web"]);

        let parsed: Vec<_> = split_tag_list(Some("b,,a, b")).into_iter().collect();
        assert_eq!(parsed, vec!["a", "b"]);
        assert!(split_tag_list(None).is_empty());
    }

    #[test]
    fn empty_query_values_count_as_absent() {
        let filters: TranslationSearchFilters = TranslationSearchQuery {
            key: Some(String::new()),
            locale: Some("en".to_string()),
            content: None,
            tags: Some(String::new()),
        }
        .into();

        assert_eq!(filters.key, None);
        assert_eq!(filters.locale.as_deref(), Some("en"));
        assert!(filters.tags.is_empty());
    }

    fn row(key: &str, locale: &str, value: &str) -> ExportRow {
        ExportRow {
            key: key.to_string(),
            locale: locale.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn export_uses_single_locale_form_when_requested_locale_present() {
        let payload = ExportPayload::from_rows(
            vec![row("a", "en", "A"), row("b", "en", "B")],
            Some("en"),
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"locale": "en", "translations": {"a": "A", "b": "B"}})
        );
    }

    #[test]
    fn export_falls_back_to_grouped_form() {
        let payload = ExportPayload::from_rows(
            vec![row("a", "en", "A"), row("a", "fr", "A-fr")],
            None,
        );
        assert_eq!(payload.len(), 2);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"locales": {"en": {"a": "A"}, "fr": {"a": "A-fr"}}})
        );

        let empty = ExportPayload::from_rows(Vec::new(), Some("de"));
        assert!(empty.is_empty());
        assert_eq!(
            serde_json::to_value(&empty).unwrap(),
            serde_json::json!({"locales": {}})
        );
    }

    #[test]
    fn duplicate_keys_keep_the_last_row() {
        let payload = ExportPayload::from_rows(
            vec![row("a", "en", "first"), row("a", "en", "second")],
            Some("en"),
        );
        match payload {
            ExportPayload::Locale { translations, .. } => {
                assert_eq!(translations.get("a").map(String::as_str), Some("second"));
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[rstest]
    #[case::no_filters(None, &[])]
    #[case::locale_and_tags(Some("pt-BR"), &["web", "mobile"])]
    fn accepts_valid_scopes(#[case] locale: Option<&str>, #[case] tags: &[&str]) {
        let tags = normalize_tags(tags);
        assert!(validate_scope(locale, &tags).is_ok());
    }

    #[rstest]
    #[case::locale_with_separator(Some("en:tags=web"), &[])]
    #[case::locale_with_space(Some("en gb"), &[])]
    #[case::long_locale(Some("en-GB-oxendict"), &[])]
    #[case::tag_with_separator(Some("en"), &["web,mobile"])]
    fn rejects_scopes_that_could_alias_cache_keys(
        #[case] locale: Option<&str>,
        #[case] tags: &[&str],
    ) {
        let tags = normalize_tags(tags);
        let err = validate_scope(locale, &tags).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn search_filters_validate_their_scope() {
        let filters = TranslationSearchFilters {
            locale: Some("en;drop".to_string()),
            ..Default::default()
        };
        assert!(filters.validate().is_err());
        assert!(TranslationSearchFilters::default().validate().is_ok());
    }
}
