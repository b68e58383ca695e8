use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Set,
};

use crate::db::now_utc;
use crate::entities::{categories, prelude::*};

pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
    pub order: i32,
    pub is_active: bool,
}

#[derive(Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<Option<String>>,
    pub parent_id: Option<Option<i32>>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

pub struct CategoryRepository {
    conn: DatabaseConnection,
}

impl CategoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, offset: u64, limit: u64) -> Result<Vec<categories::Model>> {
        let rows = Categories::find()
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list categories")?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<categories::Model>> {
        let category = Categories::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query category by ID")?;
        Ok(category)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<categories::Model>> {
        let category = Categories::find()
            .filter(categories::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query category by slug")?;
        Ok(category)
    }

    /// Direct children of a node, resolved by an indexed query rather than
    /// an in-memory graph.
    pub async fn children(&self, parent_id: i32) -> Result<Vec<categories::Model>> {
        let rows = Categories::find()
            .filter(categories::Column::ParentId.eq(parent_id))
            .all(&self.conn)
            .await
            .context("Failed to query category children")?;
        Ok(rows)
    }

    pub async fn create(&self, new: NewCategory) -> Result<categories::Model> {
        let now = now_utc();
        let model = categories::ActiveModel {
            name: Set(new.name),
            slug: Set(new.slug),
            description: Set(new.description),
            parent_id: Set(new.parent_id),
            order: Set(new.order),
            is_active: Set(new.is_active),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert category")?;
        Ok(model)
    }

    pub async fn update(&self, id: i32, patch: CategoryPatch) -> Result<Option<categories::Model>> {
        let Some(model) = Categories::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: categories::ActiveModel = model.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(slug) = patch.slug {
            active.slug = Set(slug);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(parent_id) = patch.parent_id {
            active.parent_id = Set(parent_id);
        }
        if let Some(order) = patch.order {
            active.order = Set(order);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(now_utc());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update category")?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Categories::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete category")?;
        Ok(result.rows_affected > 0)
    }
}
