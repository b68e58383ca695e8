use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub filename: String,

    pub original_filename: Option<String>,

    pub file_path: String,

    pub file_url: Option<String>,

    pub file_type: Option<String>,

    pub mime_type: Option<String>,

    pub size: Option<i32>,

    pub alt_text: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub caption: Option<String>,

    pub uploaded_by: Option<i32>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UploadedBy",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
