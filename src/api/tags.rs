use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, AppState, Pagination};
use crate::db::{NewTag, TagPatch};
use crate::entities::tags;

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<tags::Model> for TagResponse {
    fn from(m: tags::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTagRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

pub async fn list_tags(
    State(state): State<Arc<AppState>>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<TagResponse>>, ApiError> {
    let rows = state.store.list_tags(page.skip, page.limit).await?;
    Ok(Json(rows.into_iter().map(TagResponse::from).collect()))
}

pub async fn get_tag(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<TagResponse>, ApiError> {
    let tag = state
        .store
        .get_tag(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tag", id))?;
    Ok(Json(tag.into()))
}

pub async fn create_tag(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<TagResponse>), ApiError> {
    if state.store.get_tag_by_slug(&payload.slug).await?.is_some() {
        return Err(ApiError::already_exists("Tag", "slug"));
    }

    let tag = state
        .store
        .create_tag(NewTag {
            name: payload.name,
            slug: payload.slug,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(tag.into())))
}

pub async fn update_tag(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTagRequest>,
) -> Result<Json<TagResponse>, ApiError> {
    let patch = TagPatch {
        name: payload.name,
        slug: payload.slug,
    };

    let tag = state
        .store
        .update_tag(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Tag", id))?;
    Ok(Json(tag.into()))
}

pub async fn delete_tag(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_tag(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Tag", id))
    }
}
