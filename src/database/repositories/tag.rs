//! SeaORM tag repository implementation
//!
//! Tags are created lazily the first time a translation references them and
//! are never removed by translation writes.

use chrono::Utc;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::OnConflict,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::debug;

use crate::entities::{prelude::*, tags};
use crate::errors::{RepositoryError, RepositoryResult};

/// SeaORM-based tag repository
#[derive(Clone)]
pub struct TagSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl TagSeaOrmRepository {
    /// Create a new TagSeaOrmRepository
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// Map tag names to ids, creating the missing ones
    pub async fn resolve(&self, names: &BTreeSet<String>) -> RepositoryResult<BTreeMap<String, i32>> {
        Self::resolve_with(&*self.connection, names).await
    }

    /// Get-or-create on an existing connection or transaction.
    ///
    /// Uses `INSERT .. ON CONFLICT (name) DO NOTHING` followed by a select, so
    /// concurrent resolution of the same name converges on one row.
    pub async fn resolve_with<C>(
        conn: &C,
        names: &BTreeSet<String>,
    ) -> RepositoryResult<BTreeMap<String, i32>>
    where
        C: ConnectionTrait,
    {
        if names.is_empty() {
            return Ok(BTreeMap::new());
        }

        let now = Utc::now();
        let rows = names.iter().map(|name| tags::ActiveModel {
            name: Set(name.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        });

        Tags::insert_many(rows)
            .on_conflict(OnConflict::column(tags::Column::Name).do_nothing().to_owned())
            .do_nothing()
            .exec_without_returning(conn)
            .await?;

        let resolved: BTreeMap<String, i32> = Tags::find()
            .filter(tags::Column::Name.is_in(names.iter().cloned()))
            .all(conn)
            .await?
            .into_iter()
            .map(|tag| (tag.name, tag.id))
            .collect();

        if resolved.len() != names.len() {
            return Err(RepositoryError::Inconsistent {
                message: format!(
                    "resolved {} of {} tags after insert",
                    resolved.len(),
                    names.len()
                ),
            });
        }

        debug!("Resolved {} tags", resolved.len());
        Ok(resolved)
    }

    /// All tag names in ascending order
    pub async fn list_names(&self) -> RepositoryResult<Vec<String>> {
        let names = Tags::find()
            .order_by_asc(tags::Column::Name)
            .all(&*self.connection)
            .await?
            .into_iter()
            .map(|tag| tag.name)
            .collect();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::Database;
    use sea_orm::PaginatorTrait;
    use tempfile::TempDir;

    fn names(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn resolve_creates_missing_tags_once() {
        let database = Database::new_in_memory().await.unwrap();
        let repo = TagSeaOrmRepository::new(database.connection());

        let first = repo.resolve(&names(&["web", "mobile"])).await.unwrap();
        let second = repo.resolve(&names(&["mobile", "web", "desktop"])).await.unwrap();

        assert_eq!(first.get("web"), second.get("web"));
        assert_eq!(first.get("mobile"), second.get("mobile"));
        assert_eq!(second.len(), 3);
        assert_eq!(
            repo.list_names().await.unwrap(),
            vec!["desktop", "mobile", "web"]
        );
    }

    #[tokio::test]
    async fn resolving_only_existing_tags_is_not_an_error() {
        let database = Database::new_in_memory().await.unwrap();
        let repo = TagSeaOrmRepository::new(database.connection());

        repo.resolve(&names(&["web"])).await.unwrap();
        let again = repo.resolve(&names(&["web"])).await.unwrap();

        assert_eq!(again.len(), 1);
        assert!(repo.resolve(&BTreeSet::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_resolution_converges_on_one_row() {
        let temp_dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", temp_dir.path().join("tags.db").display()),
            max_connections: 4,
            ..DatabaseConfig::default()
        };
        let database = Database::new(&config).await.unwrap();
        database.migrate().await.unwrap();
        let conn = database.connection();
        let wanted = names(&["web"]);

        let (a, b, c, d) = tokio::join!(
            TagSeaOrmRepository::resolve_with(&*conn, &wanted),
            TagSeaOrmRepository::resolve_with(&*conn, &wanted),
            TagSeaOrmRepository::resolve_with(&*conn, &wanted),
            TagSeaOrmRepository::resolve_with(&*conn, &wanted),
        );
        let ids: BTreeSet<i32> = [a, b, c, d]
            .into_iter()
            .map(|resolved| resolved.unwrap()["web"])
            .collect();

        assert_eq!(ids.len(), 1);
        assert_eq!(Tags::find().count(&*conn).await.unwrap(), 1);
    }
}
