use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "translations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub key: String,
    pub locale: String,
    #[sea_orm(column_type = "Text")]
    pub value: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::translation_tag::Entity")]
    TranslationTag,
}

impl Related<super::translation_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TranslationTag.def()
    }
}

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        super::translation_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::translation_tag::Relation::Translation.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
