use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, AppState, Pagination};
use crate::db::{ContentPatch, NewContent};
use crate::entities::contents::{self, ContentStatus, ContentType};

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub author_id: i32,
    pub status: ContentStatus,
    pub content_type: ContentType,
    pub published_at: Option<String>,
    pub views_count: i32,
    pub featured_image_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<contents::Model> for ContentResponse {
    fn from(m: contents::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            slug: m.slug,
            body: m.body,
            excerpt: m.excerpt,
            author_id: m.author_id,
            status: m.status,
            content_type: m.content_type,
            published_at: m.published_at,
            views_count: m.views_count,
            featured_image_id: m.featured_image_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateContentRequest {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub author_id: i32,
    #[serde(default)]
    pub status: ContentStatus,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default)]
    pub featured_image_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub body: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub excerpt: Option<Option<String>>,
    pub status: Option<ContentStatus>,
    pub content_type: Option<ContentType>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub featured_image_id: Option<Option<i32>>,
}

pub async fn list_contents(
    State(state): State<Arc<AppState>>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<ContentResponse>>, ApiError> {
    let rows = state.store.list_contents(page.skip, page.limit).await?;
    Ok(Json(rows.into_iter().map(ContentResponse::from).collect()))
}

pub async fn get_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ContentResponse>, ApiError> {
    let content = state
        .store
        .get_content(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Content", id))?;
    Ok(Json(content.into()))
}

pub async fn create_content(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateContentRequest>,
) -> Result<(StatusCode, Json<ContentResponse>), ApiError> {
    if state
        .store
        .get_content_by_slug(&payload.slug)
        .await?
        .is_some()
    {
        return Err(ApiError::already_exists("Content", "slug"));
    }

    let content = state
        .store
        .create_content(NewContent {
            title: payload.title,
            slug: payload.slug,
            body: payload.body,
            excerpt: payload.excerpt,
            author_id: payload.author_id,
            status: payload.status,
            content_type: payload.content_type,
            featured_image_id: payload.featured_image_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(content.into())))
}

pub async fn update_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateContentRequest>,
) -> Result<Json<ContentResponse>, ApiError> {
    let patch = ContentPatch {
        title: payload.title,
        slug: payload.slug,
        body: payload.body,
        excerpt: payload.excerpt,
        status: payload.status,
        content_type: payload.content_type,
        featured_image_id: payload.featured_image_id,
    };

    let content = state
        .store
        .update_content(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Content", id))?;
    Ok(Json(content.into()))
}

pub async fn delete_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_content(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Content", id))
    }
}

pub async fn get_content_categories(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<i32>>, ApiError> {
    if state.store.get_content(id).await?.is_none() {
        return Err(ApiError::not_found("Content", id));
    }
    let ids = state.store.get_content_category_ids(id).await?;
    Ok(Json(ids))
}

/// Replaces the full category set; the body is the bare id array.
pub async fn set_content_categories(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(category_ids): Json<Vec<i32>>,
) -> Result<Json<Vec<i32>>, ApiError> {
    if state.store.get_content(id).await?.is_none() {
        return Err(ApiError::not_found("Content", id));
    }
    state
        .store
        .replace_content_categories(id, &category_ids)
        .await?;
    let ids = state.store.get_content_category_ids(id).await?;
    Ok(Json(ids))
}

pub async fn get_content_tags(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<i32>>, ApiError> {
    if state.store.get_content(id).await?.is_none() {
        return Err(ApiError::not_found("Content", id));
    }
    let ids = state.store.get_content_tag_ids(id).await?;
    Ok(Json(ids))
}

pub async fn set_content_tags(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(tag_ids): Json<Vec<i32>>,
) -> Result<Json<Vec<i32>>, ApiError> {
    if state.store.get_content(id).await?.is_none() {
        return Err(ApiError::not_found("Content", id));
    }
    state.store.replace_content_tags(id, &tag_ids).await?;
    let ids = state.store.get_content_tag_ids(id).await?;
    Ok(Json(ids))
}
