use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use crate::db::now_utc;
use crate::entities::contents::{ContentStatus, ContentType};
use crate::entities::{content_categories, content_tags, contents, prelude::*};

pub struct NewContent {
    pub title: String,
    pub slug: String,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub author_id: i32,
    pub status: ContentStatus,
    pub content_type: ContentType,
    pub featured_image_id: Option<i32>,
}

#[derive(Default)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub body: Option<Option<String>>,
    pub excerpt: Option<Option<String>>,
    pub status: Option<ContentStatus>,
    pub content_type: Option<ContentType>,
    pub featured_image_id: Option<Option<i32>>,
}

pub struct ContentRepository {
    conn: DatabaseConnection,
}

impl ContentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, offset: u64, limit: u64) -> Result<Vec<contents::Model>> {
        let rows = Contents::find()
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list contents")?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<contents::Model>> {
        let content = Contents::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query content by ID")?;
        Ok(content)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<contents::Model>> {
        let content = Contents::find()
            .filter(contents::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query content by slug")?;
        Ok(content)
    }

    pub async fn create(&self, new: NewContent) -> Result<contents::Model> {
        let now = now_utc();
        let model = contents::ActiveModel {
            title: Set(new.title),
            slug: Set(new.slug),
            body: Set(new.body),
            excerpt: Set(new.excerpt),
            author_id: Set(new.author_id),
            status: Set(new.status),
            content_type: Set(new.content_type),
            published_at: Set(None),
            views_count: Set(0),
            featured_image_id: Set(new.featured_image_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert content")?;
        Ok(model)
    }

    pub async fn update(&self, id: i32, patch: ContentPatch) -> Result<Option<contents::Model>> {
        let Some(model) = Contents::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: contents::ActiveModel = model.into();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(slug) = patch.slug {
            active.slug = Set(slug);
        }
        if let Some(body) = patch.body {
            active.body = Set(body);
        }
        if let Some(excerpt) = patch.excerpt {
            active.excerpt = Set(excerpt);
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        if let Some(content_type) = patch.content_type {
            active.content_type = Set(content_type);
        }
        if let Some(featured_image_id) = patch.featured_image_id {
            active.featured_image_id = Set(featured_image_id);
        }
        active.updated_at = Set(now_utc());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update content")?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Contents::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete content")?;
        Ok(result.rows_affected > 0)
    }

    pub async fn category_ids(&self, content_id: i32) -> Result<Vec<i32>> {
        let rows = ContentCategories::find()
            .filter(content_categories::Column::ContentId.eq(content_id))
            .order_by_asc(content_categories::Column::CategoryId)
            .all(&self.conn)
            .await
            .context("Failed to query content categories")?;
        Ok(rows.into_iter().map(|r| r.category_id).collect())
    }

    pub async fn tag_ids(&self, content_id: i32) -> Result<Vec<i32>> {
        let rows = ContentTags::find()
            .filter(content_tags::Column::ContentId.eq(content_id))
            .order_by_asc(content_tags::Column::TagId)
            .all(&self.conn)
            .await
            .context("Failed to query content tags")?;
        Ok(rows.into_iter().map(|r| r.tag_id).collect())
    }

    /// Replaces the full set of category joins for one content row.
    pub async fn replace_categories(&self, content_id: i32, category_ids: &[i32]) -> Result<()> {
        let txn = self.conn.begin().await?;

        ContentCategories::delete_many()
            .filter(content_categories::Column::ContentId.eq(content_id))
            .exec(&txn)
            .await?;

        if !category_ids.is_empty() {
            let now = now_utc();
            let rows: Vec<content_categories::ActiveModel> = category_ids
                .iter()
                .map(|&category_id| content_categories::ActiveModel {
                    content_id: Set(content_id),
                    category_id: Set(category_id),
                    created_at: Set(now.clone()),
                    ..Default::default()
                })
                .collect();

            ContentCategories::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await.context("Failed to replace categories")?;
        Ok(())
    }

    pub async fn replace_tags(&self, content_id: i32, tag_ids: &[i32]) -> Result<()> {
        let txn = self.conn.begin().await?;

        ContentTags::delete_many()
            .filter(content_tags::Column::ContentId.eq(content_id))
            .exec(&txn)
            .await?;

        if !tag_ids.is_empty() {
            let now = now_utc();
            let rows: Vec<content_tags::ActiveModel> = tag_ids
                .iter()
                .map(|&tag_id| content_tags::ActiveModel {
                    content_id: Set(content_id),
                    tag_id: Set(tag_id),
                    created_at: Set(now.clone()),
                    ..Default::default()
                })
                .collect();

            ContentTags::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await.context("Failed to replace tags")?;
        Ok(())
    }
}
