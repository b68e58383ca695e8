use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Set,
};

use crate::db::now_utc;
use crate::entities::{prelude::*, tags};

pub struct NewTag {
    pub name: String,
    pub slug: String,
}

#[derive(Default)]
pub struct TagPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
}

pub struct TagRepository {
    conn: DatabaseConnection,
}

impl TagRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, offset: u64, limit: u64) -> Result<Vec<tags::Model>> {
        let rows = Tags::find()
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list tags")?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<tags::Model>> {
        let tag = Tags::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query tag by ID")?;
        Ok(tag)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<tags::Model>> {
        let tag = Tags::find()
            .filter(tags::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query tag by slug")?;
        Ok(tag)
    }

    pub async fn create(&self, new: NewTag) -> Result<tags::Model> {
        let now = now_utc();
        let model = tags::ActiveModel {
            name: Set(new.name),
            slug: Set(new.slug),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert tag")?;
        Ok(model)
    }

    pub async fn update(&self, id: i32, patch: TagPatch) -> Result<Option<tags::Model>> {
        let Some(model) = Tags::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: tags::ActiveModel = model.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(slug) = patch.slug {
            active.slug = Set(slug);
        }
        active.updated_at = Set(now_utc());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update tag")?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Tags::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete tag")?;
        Ok(result.rows_affected > 0)
    }
}
