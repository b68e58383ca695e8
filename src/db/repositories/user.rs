use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Set,
};

use crate::db::now_utc;
use crate::entities::{prelude::*, users};

/// Fields required to insert a user row. Defaults are resolved by the
/// contract layer before this struct is built.
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub role_id: Option<i32>,
}

/// Exclude-unset patch: `None` leaves the column untouched, `Some(inner)`
/// writes it (including `Some(None)` to null a nullable column).
#[derive(Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub name: Option<Option<String>>,
    pub username: Option<Option<String>>,
    pub password_hash: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,
    pub role_id: Option<Option<i32>>,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, offset: u64, limit: u64) -> Result<Vec<users::Model>> {
        let rows = Users::find()
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<users::Model>> {
        let user = Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;
        Ok(user)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        let user = Users::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")?;
        Ok(user)
    }

    pub async fn create(&self, new: NewUser) -> Result<users::Model> {
        let now = now_utc();
        let model = users::ActiveModel {
            email: Set(new.email),
            name: Set(new.name),
            username: Set(new.username),
            password_hash: Set(new.password_hash),
            is_active: Set(new.is_active),
            is_superuser: Set(new.is_superuser),
            role_id: Set(new.role_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert user")?;
        Ok(model)
    }

    pub async fn update(&self, id: i32, patch: UserPatch) -> Result<Option<users::Model>> {
        let Some(model) = Users::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = model.into();
        if let Some(email) = patch.email {
            active.email = Set(email);
        }
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(username) = patch.username {
            active.username = Set(username);
        }
        if let Some(password_hash) = patch.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(is_superuser) = patch.is_superuser {
            active.is_superuser = Set(is_superuser);
        }
        if let Some(role_id) = patch.role_id {
            active.role_id = Set(role_id);
        }
        active.updated_at = Set(now_utc());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update user")?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete user")?;
        Ok(result.rows_affected > 0)
    }
}
