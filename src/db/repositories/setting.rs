use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Set,
};

use crate::db::now_utc;
use crate::entities::{prelude::*, settings};

pub struct NewSetting {
    pub key: String,
    pub value: Option<String>,
    pub data_type: String,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// The key itself is not patchable; it is the row's stable identity.
#[derive(Default)]
pub struct SettingPatch {
    pub value: Option<Option<String>>,
    pub data_type: Option<String>,
    pub category: Option<Option<String>>,
    pub description: Option<Option<String>>,
}

pub struct SettingRepository {
    conn: DatabaseConnection,
}

impl SettingRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, offset: u64, limit: u64) -> Result<Vec<settings::Model>> {
        let rows = Settings::find()
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list settings")?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<settings::Model>> {
        let setting = Settings::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query setting by ID")?;
        Ok(setting)
    }

    pub async fn get_by_key(&self, key: &str) -> Result<Option<settings::Model>> {
        let setting = Settings::find()
            .filter(settings::Column::Key.eq(key))
            .one(&self.conn)
            .await
            .context("Failed to query setting by key")?;
        Ok(setting)
    }

    pub async fn create(&self, new: NewSetting) -> Result<settings::Model> {
        let model = settings::ActiveModel {
            key: Set(new.key),
            value: Set(new.value),
            data_type: Set(new.data_type),
            category: Set(new.category),
            description: Set(new.description),
            updated_at: Set(now_utc()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert setting")?;
        Ok(model)
    }

    pub async fn update(&self, id: i32, patch: SettingPatch) -> Result<Option<settings::Model>> {
        let Some(model) = Settings::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: settings::ActiveModel = model.into();
        if let Some(value) = patch.value {
            active.value = Set(value);
        }
        if let Some(data_type) = patch.data_type {
            active.data_type = Set(data_type);
        }
        if let Some(category) = patch.category {
            active.category = Set(category);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        active.updated_at = Set(now_utc());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update setting")?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Settings::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete setting")?;
        Ok(result.rows_affected > 0)
    }
}
