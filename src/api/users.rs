use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, AppState, Pagination};
use crate::db::{NewUser, UserPatch};
use crate::entities::users;

/// The persisted record minus `password_hash`, which never leaves the
/// service.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub username: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub role_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<users::Model> for UserResponse {
    fn from(m: users::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            name: m.name,
            username: m.username,
            is_active: m.is_active,
            is_superuser: m.is_superuser,
            role_id: m.role_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password_hash: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub role_id: Option<i32>,
}

const fn default_true() -> bool {
    true
}

/// Missing fields are left untouched; nullable fields accept an explicit
/// `null` to clear them.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub username: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub password_hash: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub role_id: Option<Option<i32>>,
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let rows = state.store.list_users(page.skip, page.limit).await?;
    Ok(Json(rows.into_iter().map(UserResponse::from).collect()))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .store
        .get_user(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;
    Ok(Json(user.into()))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    if state.store.get_user_by_email(&payload.email).await?.is_some() {
        return Err(ApiError::already_exists("User", "email"));
    }

    let user = state
        .store
        .create_user(NewUser {
            email: payload.email,
            name: payload.name,
            username: payload.username,
            password_hash: payload.password_hash,
            is_active: payload.is_active,
            is_superuser: payload.is_superuser,
            role_id: payload.role_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let patch = UserPatch {
        email: payload.email,
        name: payload.name,
        username: payload.username,
        password_hash: payload.password_hash,
        is_active: payload.is_active,
        is_superuser: payload.is_superuser,
        role_id: payload.role_id,
    };

    let user = state
        .store
        .update_user(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;
    Ok(Json(user.into()))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_user(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("User", id))
    }
}
