use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, AppState, Pagination};
use crate::db::{NewRole, RolePatch};
use crate::entities::roles;

#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<roles::Model> for RoleResponse {
    fn from(m: roles::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub description: Option<Option<String>>,
}

pub async fn list_roles(
    State(state): State<Arc<AppState>>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<RoleResponse>>, ApiError> {
    let rows = state.store.list_roles(page.skip, page.limit).await?;
    Ok(Json(rows.into_iter().map(RoleResponse::from).collect()))
}

pub async fn get_role(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<RoleResponse>, ApiError> {
    let role = state
        .store
        .get_role(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Role", id))?;
    Ok(Json(role.into()))
}

pub async fn create_role(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRoleRequest>,
) -> Result<(StatusCode, Json<RoleResponse>), ApiError> {
    if state.store.get_role_by_name(&payload.name).await?.is_some() {
        return Err(ApiError::already_exists("Role", "name"));
    }

    let role = state
        .store
        .create_role(NewRole {
            name: payload.name,
            description: payload.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(role.into())))
}

pub async fn update_role(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<Json<RoleResponse>, ApiError> {
    let patch = RolePatch {
        name: payload.name,
        description: payload.description,
    };

    let role = state
        .store
        .update_role(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Role", id))?;
    Ok(Json(role.into()))
}

pub async fn delete_role(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_role(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Role", id))
    }
}
