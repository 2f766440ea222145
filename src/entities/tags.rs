use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
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

impl Related<super::translations::Entity> for Entity {
    fn to() -> RelationDef {
        super::translation_tag::Relation::Translation.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::translation_tag::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
