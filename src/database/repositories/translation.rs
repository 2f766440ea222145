//! SeaORM translation repository implementation
//!
//! Every write runs in a single transaction covering the translation row, tag
//! get-or-create and the association rows.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Alias, Expr, Func, Query, SelectStatement, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseBackend,
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, SqlErr, TransactionTrait,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::debug;

use super::tag::TagSeaOrmRepository;
use crate::config::defaults::{MAX_PER_PAGE, SEARCH_RESULT_LIMIT};
use crate::entities::{prelude::*, tags, translation_tag, translations};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{
    ExportRow, Translation, TranslationCreateRequest, TranslationSearchFilters,
    TranslationUpdateRequest,
};
use crate::repositories::{PaginatedResult, TranslationRepository};

// Keeps `IN (..)` lists well below the bind parameter limits of every backend
const TAG_LOAD_BATCH_SIZE: usize = 500;

/// SeaORM-based translation repository
#[derive(Clone)]
pub struct TranslationSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl TranslationSeaOrmRepository {
    /// Create a new TranslationSeaOrmRepository
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    fn model_to_domain(model: translations::Model, tags: Vec<String>) -> Translation {
        Translation {
            id: model.id,
            key: model.key,
            locale: model.locale,
            value: model.value,
            tags,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    /// Tag names per translation id, sorted ascending
    async fn load_tags<C>(conn: &C, ids: &[i32]) -> RepositoryResult<HashMap<i32, Vec<String>>>
    where
        C: ConnectionTrait,
    {
        let mut by_translation: HashMap<i32, Vec<String>> = HashMap::new();

        for chunk in ids.chunks(TAG_LOAD_BATCH_SIZE) {
            let rows = TranslationTag::find()
                .filter(translation_tag::Column::TranslationId.is_in(chunk.iter().copied()))
                .find_also_related(Tags)
                .all(conn)
                .await?;

            for (link, tag) in rows {
                if let Some(tag) = tag {
                    by_translation
                        .entry(link.translation_id)
                        .or_default()
                        .push(tag.name);
                }
            }
        }

        for names in by_translation.values_mut() {
            names.sort();
        }
        Ok(by_translation)
    }

    async fn hydrate<C>(conn: &C, models: Vec<translations::Model>) -> RepositoryResult<Vec<Translation>>
    where
        C: ConnectionTrait,
    {
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let mut tags = Self::load_tags(conn, &ids).await?;

        Ok(models
            .into_iter()
            .map(|model| {
                let names = tags.remove(&model.id).unwrap_or_default();
                Self::model_to_domain(model, names)
            })
            .collect())
    }

    /// Make the association set of `translation_id` equal to `names`
    async fn sync_tags<C>(
        conn: &C,
        translation_id: i32,
        names: &BTreeSet<String>,
    ) -> RepositoryResult<Vec<String>>
    where
        C: ConnectionTrait,
    {
        let resolved = TagSeaOrmRepository::resolve_with(conn, names).await?;
        let target: BTreeSet<i32> = resolved.values().copied().collect();

        let existing: BTreeSet<i32> = TranslationTag::find()
            .filter(translation_tag::Column::TranslationId.eq(translation_id))
            .all(conn)
            .await?
            .into_iter()
            .map(|link| link.tag_id)
            .collect();

        let stale: Vec<i32> = existing.difference(&target).copied().collect();
        if !stale.is_empty() {
            TranslationTag::delete_many()
                .filter(translation_tag::Column::TranslationId.eq(translation_id))
                .filter(translation_tag::Column::TagId.is_in(stale))
                .exec(conn)
                .await?;
        }

        let now = Utc::now();
        let missing: Vec<translation_tag::ActiveModel> = target
            .difference(&existing)
            .map(|tag_id| translation_tag::ActiveModel {
                translation_id: Set(translation_id),
                tag_id: Set(*tag_id),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            })
            .collect();
        if !missing.is_empty() {
            TranslationTag::insert_many(missing)
                .exec_without_returning(conn)
                .await?;
        }

        debug!(
            "Synced {} tags for translation {}",
            resolved.len(),
            translation_id
        );
        Ok(resolved.into_keys().collect())
    }

    fn map_write_error(err: DbErr, key: &str, locale: &str) -> RepositoryError {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => RepositoryError::constraint_violation(
                "translation",
                format!("translation '{key}' already exists for locale '{locale}'"),
            ),
            _ => RepositoryError::Database(err),
        }
    }

    /// Case-sensitive substring match for `backend`
    fn contains(backend: DatabaseBackend, column: translations::Column, needle: &str) -> SimpleExpr {
        let column = Expr::col((translations::Entity, column));
        let position = match backend {
            DatabaseBackend::Postgres => Func::cust(Alias::new("strpos")).arg(column).arg(needle),
            DatabaseBackend::MySql => Func::cust(Alias::new("INSTR"))
                .arg(Func::cast_as(column, Alias::new("BINARY")))
                .arg(needle),
            _ => Func::cust(Alias::new("instr")).arg(column).arg(needle),
        };
        Expr::expr(position).gt(0)
    }

    /// Ids of translations linked to tags in `names`
    ///
    /// With `require_all` only translations carrying every name are returned.
    fn tagged_ids(names: &BTreeSet<String>, require_all: bool) -> SelectStatement {
        let mut query = Query::select();
        query
            .column((translation_tag::Entity, translation_tag::Column::TranslationId))
            .from(translation_tag::Entity)
            .inner_join(
                tags::Entity,
                Expr::col((tags::Entity, tags::Column::Id))
                    .equals((translation_tag::Entity, translation_tag::Column::TagId)),
            )
            .and_where(Expr::col((tags::Entity, tags::Column::Name)).is_in(names.iter().cloned()));

        if require_all {
            query
                .group_by_col((translation_tag::Entity, translation_tag::Column::TranslationId))
                .and_having(
                    Expr::expr(Func::count(Expr::col((tags::Entity, tags::Column::Id))))
                        .eq(names.len() as i64),
                );
        } else {
            query.distinct();
        }

        query.to_owned()
    }

    fn search_condition(&self, filters: &TranslationSearchFilters) -> Condition {
        let backend = self.connection.get_database_backend();
        let mut condition = Condition::all();

        if let Some(key) = &filters.key {
            condition = condition.add(Self::contains(backend, translations::Column::Key, key));
        }
        if let Some(locale) = &filters.locale {
            condition = condition.add(translations::Column::Locale.eq(locale.as_str()));
        }
        if let Some(content) = &filters.content {
            condition = condition.add(Self::contains(backend, translations::Column::Value, content));
        }
        if !filters.tags.is_empty() {
            condition = condition
                .add(translations::Column::Id.in_subquery(Self::tagged_ids(&filters.tags, true)));
        }

        condition
    }
}

#[async_trait]
impl TranslationRepository for TranslationSeaOrmRepository {
    async fn create(&self, request: TranslationCreateRequest) -> RepositoryResult<Translation> {
        let tag_names = request.tag_set();
        let now = Utc::now();

        let txn = self.connection.begin().await?;

        let active = translations::ActiveModel {
            key: Set(request.key.clone()),
            locale: Set(request.locale.clone()),
            value: Set(request.value),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let model = active
            .insert(&txn)
            .await
            .map_err(|e| Self::map_write_error(e, &request.key, &request.locale))?;

        let tags = Self::sync_tags(&txn, model.id, &tag_names).await?;
        txn.commit().await?;

        debug!("Created translation {} ({}) id={}", model.key, model.locale, model.id);
        Ok(Self::model_to_domain(model, tags))
    }

    async fn update(
        &self,
        id: i32,
        request: TranslationUpdateRequest,
    ) -> RepositoryResult<Translation> {
        let txn = self.connection.begin().await?;

        let existing = Translations::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| RepositoryError::record_not_found("translation", "id", id.to_string()))?;

        let key = request.key.clone().unwrap_or_else(|| existing.key.clone());
        let locale = request.locale.clone().unwrap_or_else(|| existing.locale.clone());
        let tag_names = request.tag_set();

        let mut active: translations::ActiveModel = existing.into();
        if let Some(new_key) = request.key {
            active.key = Set(new_key);
        }
        if let Some(new_locale) = request.locale {
            active.locale = Set(new_locale);
        }
        if let Some(new_value) = request.value {
            active.value = Set(new_value);
        }
        active.updated_at = Set(Utc::now());

        let model = active
            .update(&txn)
            .await
            .map_err(|e| Self::map_write_error(e, &key, &locale))?;

        let tags = match tag_names {
            Some(names) => Self::sync_tags(&txn, model.id, &names).await?,
            None => Self::load_tags(&txn, &[model.id])
                .await?
                .remove(&model.id)
                .unwrap_or_default(),
        };
        txn.commit().await?;

        Ok(Self::model_to_domain(model, tags))
    }

    async fn delete(&self, id: i32) -> RepositoryResult<bool> {
        let txn = self.connection.begin().await?;

        TranslationTag::delete_many()
            .filter(translation_tag::Column::TranslationId.eq(id))
            .exec(&txn)
            .await?;
        let result = Translations::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Translation>> {
        let conn = &*self.connection;
        let Some(model) = Translations::find_by_id(id).one(conn).await? else {
            return Ok(None);
        };

        let tags = Self::load_tags(conn, &[model.id])
            .await?
            .remove(&model.id)
            .unwrap_or_default();
        Ok(Some(Self::model_to_domain(model, tags)))
    }

    async fn list_page(
        &self,
        page: u64,
        per_page: u64,
    ) -> RepositoryResult<PaginatedResult<Translation>> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, MAX_PER_PAGE);
        let conn = &*self.connection;

        let paginator = Translations::find()
            .order_by_desc(translations::Column::CreatedAt)
            .order_by_desc(translations::Column::Id)
            .paginate(conn, per_page);

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page - 1).await?;
        let items = Self::hydrate(conn, models).await?;

        Ok(PaginatedResult::new(items, page, per_page, total))
    }

    async fn search(
        &self,
        filters: TranslationSearchFilters,
    ) -> RepositoryResult<Vec<Translation>> {
        let conn = &*self.connection;

        let models = Translations::find()
            .filter(self.search_condition(&filters))
            .order_by_asc(translations::Column::Key)
            .order_by_asc(translations::Column::Locale)
            .limit(SEARCH_RESULT_LIMIT)
            .all(conn)
            .await?;

        debug!("Search matched {} translations", models.len());
        Self::hydrate(conn, models).await
    }

    async fn export_rows(
        &self,
        locale: Option<String>,
        tags: BTreeSet<String>,
    ) -> RepositoryResult<Vec<ExportRow>> {
        let mut query = Translations::find()
            .select_only()
            .column(translations::Column::Key)
            .column(translations::Column::Locale)
            .column(translations::Column::Value);

        if let Some(locale) = locale {
            query = query.filter(translations::Column::Locale.eq(locale));
        }
        if !tags.is_empty() {
            query = query.filter(translations::Column::Id.in_subquery(Self::tagged_ids(&tags, false)));
        }

        let rows = query
            .order_by_asc(translations::Column::Key)
            .order_by_asc(translations::Column::Locale)
            .into_model::<ExportRow>()
            .all(&*self.connection)
            .await?;

        Ok(rows)
    }
}
