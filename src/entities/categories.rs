use sea_orm::entity::prelude::*;

/// Category tree node. Children are resolved by querying on `parent_id`,
/// never by holding an in-memory graph. Cycles are not prevented here.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique, indexed)]
    pub name: String,

    #[sea_orm(unique, indexed)]
    pub slug: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub parent_id: Option<i32>,

    pub order: i32,

    pub is_active: bool,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Parent,
    #[sea_orm(has_many = "super::content_categories::Entity")]
    ContentCategories,
}

impl Related<super::content_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentCategories.def()
    }
}

impl Related<super::contents::Entity> for Entity {
    fn to() -> RelationDef {
        super::content_categories::Relation::Contents.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::content_categories::Relation::Categories.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
