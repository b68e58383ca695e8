use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Set,
};

use crate::db::now_utc;
use crate::entities::{prelude::*, roles};

pub struct NewRole {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Default)]
pub struct RolePatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

pub struct RoleRepository {
    conn: DatabaseConnection,
}

impl RoleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, offset: u64, limit: u64) -> Result<Vec<roles::Model>> {
        let rows = Roles::find()
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list roles")?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<roles::Model>> {
        let role = Roles::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query role by ID")?;
        Ok(role)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<roles::Model>> {
        let role = Roles::find()
            .filter(roles::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query role by name")?;
        Ok(role)
    }

    pub async fn create(&self, new: NewRole) -> Result<roles::Model> {
        let now = now_utc();
        let model = roles::ActiveModel {
            name: Set(new.name),
            description: Set(new.description),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert role")?;
        Ok(model)
    }

    pub async fn update(&self, id: i32, patch: RolePatch) -> Result<Option<roles::Model>> {
        let Some(model) = Roles::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: roles::ActiveModel = model.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        active.updated_at = Set(now_utc());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update role")?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Roles::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete role")?;
        Ok(result.rows_affected > 0)
    }
}
