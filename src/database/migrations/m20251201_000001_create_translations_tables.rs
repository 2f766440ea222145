use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create tables in order of dependencies
        self.create_translations_table(manager).await?;
        self.create_tags_table(manager).await?;
        self.create_translation_tag_table(manager).await?;

        self.create_indexes(manager).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order
        manager
            .drop_table(Table::drop().table(TranslationTag::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Translations::Table).to_owned())
            .await?;

        Ok(())
    }
}

impl Migration {
    fn create_id_column(&self, column: impl IntoIden) -> ColumnDef {
        let mut col = ColumnDef::new(column);
        col.integer().not_null().auto_increment().primary_key();
        col
    }

    fn create_fk_column(&self, column: impl IntoIden) -> ColumnDef {
        let mut col = ColumnDef::new(column);
        col.integer().not_null();
        col
    }

    // SQLite keeps timestamps as text, the server databases get native types
    fn create_timestamp_column(&self, manager: &SchemaManager, column: impl IntoIden) -> ColumnDef {
        let mut col = ColumnDef::new(column);
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres => col.timestamp_with_time_zone().not_null(),
            sea_orm::DatabaseBackend::MySql => col.timestamp().not_null(),
            _ => col.string().not_null(),
        };
        col
    }

    async fn create_translations_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Translations::Table)
                    .if_not_exists()
                    .col(self.create_id_column(Translations::Id))
                    .col(ColumnDef::new(Translations::Key).string_len(255).not_null())
                    .col(ColumnDef::new(Translations::Locale).string_len(10).not_null())
                    .col(ColumnDef::new(Translations::Value).text().not_null())
                    .col(self.create_timestamp_column(manager, Translations::CreatedAt))
                    .col(self.create_timestamp_column(manager, Translations::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn create_tags_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(self.create_id_column(Tags::Id))
                    .col(ColumnDef::new(Tags::Name).string_len(50).not_null())
                    .col(self.create_timestamp_column(manager, Tags::CreatedAt))
                    .col(self.create_timestamp_column(manager, Tags::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn create_translation_tag_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TranslationTag::Table)
                    .if_not_exists()
                    .col(self.create_id_column(TranslationTag::Id))
                    .col(self.create_fk_column(TranslationTag::TranslationId))
                    .col(self.create_fk_column(TranslationTag::TagId))
                    .col(self.create_timestamp_column(manager, TranslationTag::CreatedAt))
                    .col(self.create_timestamp_column(manager, TranslationTag::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_translation_tag_translation_id")
                            .from(TranslationTag::Table, TranslationTag::TranslationId)
                            .to(Translations::Table, Translations::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_translation_tag_tag_id")
                            .from(TranslationTag::Table, TranslationTag::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_indexes(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        // Translations: one row per (key, locale)
        manager
            .create_index(
                Index::create()
                    .name("idx_translations_key_locale_unique")
                    .table(Translations::Table)
                    .col(Translations::Key)
                    .col(Translations::Locale)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_translations_key")
                    .table(Translations::Table)
                    .col(Translations::Key)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_translations_locale")
                    .table(Translations::Table)
                    .col(Translations::Locale)
                    .to_owned(),
            )
            .await?;

        // Locale-scoped exports ordered by key
        manager
            .create_index(
                Index::create()
                    .name("idx_translations_locale_key")
                    .table(Translations::Table)
                    .col(Translations::Locale)
                    .col(Translations::Key)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_translations_created_at")
                    .table(Translations::Table)
                    .col(Translations::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Tags
        manager
            .create_index(
                Index::create()
                    .name("idx_tags_name_unique")
                    .table(Tags::Table)
                    .col(Tags::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Translation <-> tag associations
        manager
            .create_index(
                Index::create()
                    .name("idx_translation_tag_unique")
                    .table(TranslationTag::Table)
                    .col(TranslationTag::TranslationId)
                    .col(TranslationTag::TagId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_translation_tag_translation_id")
                    .table(TranslationTag::Table)
                    .col(TranslationTag::TranslationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_translation_tag_tag_id")
                    .table(TranslationTag::Table)
                    .col(TranslationTag::TagId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Translations {
    Table,
    Id,
    Key,
    Locale,
    Value,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TranslationTag {
    Table,
    Id,
    TranslationId,
    TagId,
    CreatedAt,
    UpdatedAt,
}
