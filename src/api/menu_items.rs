use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::db::{MenuItemPatch, NewMenuItem};
use crate::entities::menu_items;

#[derive(Debug, Serialize)]
pub struct MenuItemResponse {
    pub id: i32,
    pub menu_id: i32,
    pub parent_id: Option<i32>,
    pub label: String,
    pub url: Option<String>,
    pub target: String,
    pub icon: Option<String>,
    pub order: i32,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<menu_items::Model> for MenuItemResponse {
    fn from(m: menu_items::Model) -> Self {
        Self {
            id: m.id,
            menu_id: m.menu_id,
            parent_id: m.parent_id,
            label: m.label,
            url: m.url,
            target: m.target,
            icon: m.icon,
            order: m.order,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateMenuItemRequest {
    pub menu_id: i32,
    #[serde(default)]
    pub parent_id: Option<i32>,
    pub label: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_target() -> String {
    "_self".to_string()
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct UpdateMenuItemRequest {
    #[serde(default, deserialize_with = "super::double_option")]
    pub parent_id: Option<Option<i32>>,
    pub label: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub url: Option<Option<String>>,
    pub target: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub icon: Option<Option<String>>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Listing is always scoped to one menu.
#[derive(Debug, Deserialize)]
pub struct MenuItemsQuery {
    pub menu_id: i32,
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

const fn default_limit() -> u64 {
    100
}

pub async fn list_menu_items(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MenuItemsQuery>,
) -> Result<Json<Vec<MenuItemResponse>>, ApiError> {
    let rows = state
        .store
        .list_menu_items(query.menu_id, query.skip, query.limit)
        .await?;
    Ok(Json(rows.into_iter().map(MenuItemResponse::from).collect()))
}

pub async fn get_menu_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let item = state
        .store
        .get_menu_item(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Menu item", id))?;
    Ok(Json(item.into()))
}

pub async fn create_menu_item(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateMenuItemRequest>,
) -> Result<(StatusCode, Json<MenuItemResponse>), ApiError> {
    if state.store.get_menu(payload.menu_id).await?.is_none() {
        return Err(ApiError::not_found("Menu", payload.menu_id));
    }

    let item = state
        .store
        .create_menu_item(NewMenuItem {
            menu_id: payload.menu_id,
            parent_id: payload.parent_id,
            label: payload.label,
            url: payload.url,
            target: payload.target,
            icon: payload.icon,
            order: payload.order,
            is_active: payload.is_active,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

pub async fn update_menu_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMenuItemRequest>,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let patch = MenuItemPatch {
        parent_id: payload.parent_id,
        label: payload.label,
        url: payload.url,
        target: payload.target,
        icon: payload.icon,
        order: payload.order,
        is_active: payload.is_active,
    };

    let item = state
        .store
        .update_menu_item(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Menu item", id))?;
    Ok(Json(item.into()))
}

pub async fn delete_menu_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_menu_item(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Menu item", id))
    }
}
