//! SeaORM migrations for multi-database support
//!
//! Migrations are written against the schema builder so the same code runs on
//! SQLite, PostgreSQL and MySQL.

use sea_orm_migration::prelude::*;

pub mod m20251201_000001_create_translations_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(
            m20251201_000001_create_translations_tables::Migration,
        )]
    }
}
