use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, AppState, Pagination};
use crate::db::{MediaPatch, NewMedia};
use crate::entities::media;

#[derive(Debug, Serialize)]
pub struct MediaResponse {
    pub id: i32,
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
    pub created_at: String,
    pub updated_at: String,
}

impl From<media::Model> for MediaResponse {
    fn from(m: media::Model) -> Self {
        Self {
            id: m.id,
            filename: m.filename,
            original_filename: m.original_filename,
            file_path: m.file_path,
            file_url: m.file_url,
            file_type: m.file_type,
            mime_type: m.mime_type,
            size: m.size,
            alt_text: m.alt_text,
            caption: m.caption,
            uploaded_by: m.uploaded_by,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateMediaRequest {
    pub filename: String,
    #[serde(default)]
    pub original_filename: Option<String>,
    pub file_path: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size: Option<i32>,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub uploaded_by: Option<i32>,
}

/// Only the annotation fields may change after upload.
#[derive(Debug, Deserialize)]
pub struct UpdateMediaRequest {
    #[serde(default, deserialize_with = "super::double_option")]
    pub alt_text: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub caption: Option<Option<String>>,
}

pub async fn list_media(
    State(state): State<Arc<AppState>>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<MediaResponse>>, ApiError> {
    let rows = state.store.list_media(page.skip, page.limit).await?;
    Ok(Json(rows.into_iter().map(MediaResponse::from).collect()))
}

pub async fn get_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MediaResponse>, ApiError> {
    let item = state
        .store
        .get_media(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Media", id))?;
    Ok(Json(item.into()))
}

pub async fn create_media(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateMediaRequest>,
) -> Result<(StatusCode, Json<MediaResponse>), ApiError> {
    let item = state
        .store
        .create_media(NewMedia {
            filename: payload.filename,
            original_filename: payload.original_filename,
            file_path: payload.file_path,
            file_url: payload.file_url,
            file_type: payload.file_type,
            mime_type: payload.mime_type,
            size: payload.size,
            alt_text: payload.alt_text,
            caption: payload.caption,
            uploaded_by: payload.uploaded_by,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

pub async fn update_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMediaRequest>,
) -> Result<Json<MediaResponse>, ApiError> {
    let patch = MediaPatch {
        alt_text: payload.alt_text,
        caption: payload.caption,
    };

    let item = state
        .store
        .update_media(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Media", id))?;
    Ok(Json(item.into()))
}

pub async fn delete_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_media(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Media", id))
    }
}
