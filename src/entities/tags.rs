use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique, indexed)]
    pub name: String,

    #[sea_orm(unique, indexed)]
    pub slug: String,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::content_tags::Entity")]
    ContentTags,
}

impl Related<super::content_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentTags.def()
    }
}

impl Related<super::contents::Entity> for Entity {
    fn to() -> RelationDef {
        super::content_tags::Relation::Contents.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::content_tags::Relation::Tags.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
