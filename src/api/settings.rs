use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, AppState, Pagination};
use crate::db::{NewSetting, SettingPatch};
use crate::entities::settings;

#[derive(Debug, Serialize)]
pub struct SettingResponse {
    pub id: i32,
    pub key: String,
    pub value: Option<String>,
    pub data_type: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub updated_at: String,
}

impl From<settings::Model> for SettingResponse {
    fn from(m: settings::Model) -> Self {
        Self {
            id: m.id,
            key: m.key,
            value: m.value,
            data_type: m.data_type,
            category: m.category,
            description: m.description,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSettingRequest {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default = "default_data_type")]
    pub data_type: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_data_type() -> String {
    "string".to_string()
}

/// The key is the row's identity and cannot be changed here.
#[derive(Debug, Deserialize)]
pub struct UpdateSettingRequest {
    #[serde(default, deserialize_with = "super::double_option")]
    pub value: Option<Option<String>>,
    pub data_type: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub description: Option<Option<String>>,
}

pub async fn list_settings(
    State(state): State<Arc<AppState>>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<SettingResponse>>, ApiError> {
    let rows = state.store.list_settings(page.skip, page.limit).await?;
    Ok(Json(rows.into_iter().map(SettingResponse::from).collect()))
}

pub async fn get_setting(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<SettingResponse>, ApiError> {
    let setting = state
        .store
        .get_setting(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Setting", id))?;
    Ok(Json(setting.into()))
}

pub async fn create_setting(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateSettingRequest>,
) -> Result<(StatusCode, Json<SettingResponse>), ApiError> {
    if state
        .store
        .get_setting_by_key(&payload.key)
        .await?
        .is_some()
    {
        return Err(ApiError::already_exists("Setting", "key"));
    }

    let setting = state
        .store
        .create_setting(NewSetting {
            key: payload.key,
            value: payload.value,
            data_type: payload.data_type,
            category: payload.category,
            description: payload.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(setting.into())))
}

pub async fn update_setting(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateSettingRequest>,
) -> Result<Json<SettingResponse>, ApiError> {
    let patch = SettingPatch {
        value: payload.value,
        data_type: payload.data_type,
        category: payload.category,
        description: payload.description,
    };

    let setting = state
        .store
        .update_setting(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Setting", id))?;
    Ok(Json(setting.into()))
}

pub async fn delete_setting(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_setting(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Setting", id))
    }
}
