use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, AppState, Pagination};
use crate::db::{CategoryPatch, NewCategory};
use crate::entities::categories;

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
    pub order: i32,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<categories::Model> for CategoryResponse {
    fn from(m: categories::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            description: m.description,
            parent_id: m.parent_id,
            order: m.order,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i32>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub parent_id: Option<Option<i32>>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let rows = state.store.list_categories(page.skip, page.limit).await?;
    Ok(Json(rows.into_iter().map(CategoryResponse::from).collect()))
}

pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = state
        .store
        .get_category(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", id))?;
    Ok(Json(category.into()))
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    if state
        .store
        .get_category_by_slug(&payload.slug)
        .await?
        .is_some()
    {
        return Err(ApiError::already_exists("Category", "slug"));
    }

    let category = state
        .store
        .create_category(NewCategory {
            name: payload.name,
            slug: payload.slug,
            description: payload.description,
            parent_id: payload.parent_id,
            order: payload.order,
            is_active: payload.is_active,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let patch = CategoryPatch {
        name: payload.name,
        slug: payload.slug,
        description: payload.description,
        parent_id: payload.parent_id,
        order: payload.order,
        is_active: payload.is_active,
    };

    let category = state
        .store
        .update_category(id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", id))?;
    Ok(Json(category.into()))
}

pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_category(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Category", id))
    }
}
