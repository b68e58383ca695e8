use axum::{Json, extract::State, http::HeaderValue, middleware, routing::get};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;

mod categories;
mod contents;
mod error;
mod media;
mod menu_items;
mod menus;
mod observability;
mod roles;
mod settings;
mod tags;
mod users;

pub use error::{ApiError, ErrorBody};

use metrics_exporter_prometheus::PrometheusHandle;

/// Query parameters shared by every collection listing.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

const fn default_limit() -> u64 {
    100
}

/// Distinguishes an absent update field from an explicit `null`. Pair with
/// `#[serde(default)]` on an `Option<Option<T>>` field: absent stays `None`,
/// `null` becomes `Some(None)`, a value becomes `Some(Some(v))`.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

#[derive(Clone)]
pub struct AppState {
    pub store: Store,

    pub config: Config,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_url,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    Ok(Arc::new(AppState {
        store,
        config,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    }))
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    uptime_seconds: u64,
}

async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthStatus>, ApiError> {
    state.store.ping().await?;
    Ok(Json(HealthStatus {
        status: "ok",
        uptime_seconds: state.start_time.elapsed().as_secs(),
    }))
}

pub fn router(state: Arc<AppState>) -> axum::Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let api_router = axum::Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/roles", get(roles::list_roles).post(roles::create_role))
        .route(
            "/roles/{id}",
            get(roles::get_role)
                .put(roles::update_role)
                .delete(roles::delete_role),
        )
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route("/tags", get(tags::list_tags).post(tags::create_tag))
        .route(
            "/tags/{id}",
            get(tags::get_tag)
                .put(tags::update_tag)
                .delete(tags::delete_tag),
        )
        .route(
            "/contents",
            get(contents::list_contents).post(contents::create_content),
        )
        .route(
            "/contents/{id}",
            get(contents::get_content)
                .put(contents::update_content)
                .delete(contents::delete_content),
        )
        .route(
            "/contents/{id}/categories",
            get(contents::get_content_categories).put(contents::set_content_categories),
        )
        .route(
            "/contents/{id}/tags",
            get(contents::get_content_tags).put(contents::set_content_tags),
        )
        .route("/media", get(media::list_media).post(media::create_media))
        .route(
            "/media/{id}",
            get(media::get_media)
                .put(media::update_media)
                .delete(media::delete_media),
        )
        .route("/menus", get(menus::list_menus).post(menus::create_menu))
        .route(
            "/menus/{id}",
            get(menus::get_menu)
                .put(menus::update_menu)
                .delete(menus::delete_menu),
        )
        .route(
            "/menu-items",
            get(menu_items::list_menu_items).post(menu_items::create_menu_item),
        )
        .route(
            "/menu-items/{id}",
            get(menu_items::get_menu_item)
                .put(menu_items::update_menu_item)
                .delete(menu_items::delete_menu_item),
        )
        .route(
            "/settings",
            get(settings::list_settings).post(settings::create_setting),
        )
        .route(
            "/settings/{id}",
            get(settings::get_setting)
                .put(settings::update_setting)
                .delete(settings::delete_setting),
        );

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    axum::Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(observability::get_metrics))
        .nest("/api", api_router)
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}
