use sea_orm::entity::prelude::*;

/// Key/value configuration row. `value` is stored as text no matter what
/// `data_type` declares; coercion is left to the consumer.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique, indexed)]
    pub key: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub value: Option<String>,

    pub data_type: String,

    pub category: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
