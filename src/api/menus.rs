use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, AppState, Pagination};
use crate::db::{MenuPatch, NewMenu};
use crate::entities::menus;

#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub id: i32,
    pub name: String,
    pub location: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<menus::Model> for MenuResponse {
    fn from(m: menus::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            location: m.location,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateMenuRequest {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMenuRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub location: Option<Option<String>>,
}

pub async fn list_menus(
    State(state): State<Arc<AppState>>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<MenuResponse>>, ApiError> {
    let rows = state.store.list_menus(page.skip, page.limit).await?;
    Ok(Json(rows.into_iter().map(MenuResponse::from).collect()))
}

pub async fn get_menu(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MenuResponse>, ApiError> {
    let menu = state
        .store
        .get_menu(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Menu", id))?;
    Ok(Json(menu.into()))
}

pub async fn create_menu(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateMenuRequest>,
) -> Result<(StatusCode, Json<MenuResponse>), ApiError> {
    let menu = state
        .store
        .create_menu(NewMenu {
            name: payload.name,
            location: payload.location,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(menu.into())))
}

pub async fn update_menu(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMenuRequest>,
) -> Result<Json<MenuResponse>, ApiError> {
    let patch = MenuPatch {
        name: payload.name,
        location: payload.location,
    };

    let menu = state
        .store
        .update_menu(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Menu", id))?;
    Ok(Json(menu.into()))
}

pub async fn delete_menu(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_menu(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Menu", id))
    }
}
