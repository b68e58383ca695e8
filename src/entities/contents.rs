use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Editorial lifecycle of a piece of content.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "archived")]
    Archived,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    #[sea_orm(string_value = "post")]
    Post,
    #[sea_orm(string_value = "page")]
    Page,
    #[sea_orm(string_value = "article")]
    Article,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    #[sea_orm(unique, indexed)]
    pub slug: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub body: Option<String>,

    pub excerpt: Option<String>,

    pub author_id: i32,

    pub status: ContentStatus,

    pub content_type: ContentType,

    pub published_at: Option<String>,

    pub views_count: i32,

    /// Soft reference into `media`; intentionally not a foreign key.
    pub featured_image_id: Option<i32>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AuthorId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
    #[sea_orm(has_many = "super::content_categories::Entity")]
    ContentCategories,
    #[sea_orm(has_many = "super::content_tags::Entity")]
    ContentTags,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::content_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentCategories.def()
    }
}

impl Related<super::content_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentTags.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::content_categories::Relation::Categories.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::content_categories::Relation::Contents.def().rev())
    }
}

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        super::content_tags::Relation::Tags.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::content_tags::Relation::Contents.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
