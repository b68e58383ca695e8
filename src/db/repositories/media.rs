use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QuerySelect, Set};

use crate::db::now_utc;
use crate::entities::{media, prelude::*};

pub struct NewMedia {
    pub filename: String,
    pub original_filename: Option<String>,
    pub file_path: String,
    pub file_url: Option<String>,
    pub file_type: Option<String>,
    pub mime_type: Option<String>,
    pub size: Option<i32>,
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub uploaded_by: Option<i32>,
}

/// Only annotation fields are patchable; file identity is immutable once
/// recorded, matching the original service.
#[derive(Default)]
pub struct MediaPatch {
    pub alt_text: Option<Option<String>>,
    pub caption: Option<Option<String>>,
}

pub struct MediaRepository {
    conn: DatabaseConnection,
}

impl MediaRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, offset: u64, limit: u64) -> Result<Vec<media::Model>> {
        let rows = Media::find()
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list media")?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<media::Model>> {
        let item = Media::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query media by ID")?;
        Ok(item)
    }

    pub async fn create(&self, new: NewMedia) -> Result<media::Model> {
        let now = now_utc();
        let model = media::ActiveModel {
            filename: Set(new.filename),
            original_filename: Set(new.original_filename),
            file_path: Set(new.file_path),
            file_url: Set(new.file_url),
            file_type: Set(new.file_type),
            mime_type: Set(new.mime_type),
            size: Set(new.size),
            alt_text: Set(new.alt_text),
            caption: Set(new.caption),
            uploaded_by: Set(new.uploaded_by),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert media")?;
        Ok(model)
    }

    pub async fn update(&self, id: i32, patch: MediaPatch) -> Result<Option<media::Model>> {
        let Some(model) = Media::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: media::ActiveModel = model.into();
        if let Some(alt_text) = patch.alt_text {
            active.alt_text = Set(alt_text);
        }
        if let Some(caption) = patch.caption {
            active.caption = Set(caption);
        }
        active.updated_at = Set(now_utc());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update media")?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Media::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete media")?;
        Ok(result.rows_affected > 0)
    }
}
