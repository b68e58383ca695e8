use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use contentd::config::Config;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_url = "sqlite::memory:".to_string();

    let state = contentd::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    contentd::api::router(state)
}

async fn send_json(app: &Router, method: &str, uri: &str, body: &Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn delete(app: &Router, uri: &str) -> StatusCode {
    app.clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_user_crud_flow() {
    let app = spawn_app().await;

    let (status, user) = send_json(
        &app,
        "POST",
        "/api/users",
        &json!({"email": "ada@example.com", "name": "Ada"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["is_active"], true);
    assert_eq!(user["is_superuser"], false);
    assert!(user.get("password_hash").is_none());
    let id = user["id"].as_i64().unwrap();

    // Duplicate email is rejected before hitting the unique index
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/users",
        &json!({"email": "ada@example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("email"));

    let (status, list) = get(&app, "/api/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, fetched) = get(&app, &format!("/api/users/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Ada");

    // Partial update leaves untouched fields alone
    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/api/users/{id}"),
        &json!({"name": "Ada Lovelace"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Ada Lovelace");
    assert_eq!(updated["email"], "ada@example.com");

    // Explicit null clears a nullable field
    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/api/users/{id}"),
        &json!({"name": null}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated["name"].is_null());
    assert_eq!(updated["email"], "ada@example.com");

    assert_eq!(delete(&app, &format!("/api/users/{id}")).await, StatusCode::NO_CONTENT);

    let (status, _) = get(&app, &format!("/api/users/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(delete(&app, &format!("/api/users/{id}")).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_role_duplicate_name() {
    let app = spawn_app().await;

    let (status, _) = send_json(&app, "POST", "/api/roles", &json!({"name": "editor"})).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send_json(&app, "POST", "/api/roles", &json!({"name": "editor"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_content_requires_existing_author() {
    let app = spawn_app().await;

    // author_id 999 violates the foreign key; surfaced as a server error
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/contents",
        &json!({"title": "Orphan", "slug": "orphan", "author_id": 999}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, list) = get(&app, "/api/contents").await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_content_lifecycle_and_joins() {
    let app = spawn_app().await;

    let (_, author) = send_json(
        &app,
        "POST",
        "/api/users",
        &json!({"email": "author@example.com"}),
    )
    .await;
    let author_id = author["id"].as_i64().unwrap();

    let (status, content) = send_json(
        &app,
        "POST",
        "/api/contents",
        &json!({
            "title": "Hello",
            "slug": "hello",
            "body": "First post",
            "author_id": author_id,
            "status": "draft"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(content["status"], "draft");
    assert_eq!(content["content_type"], "post");
    assert_eq!(content["views_count"], 0);
    let content_id = content["id"].as_i64().unwrap();

    // Duplicate slug
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/contents",
        &json!({"title": "Other", "slug": "hello", "author_id": author_id}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Invalid enum values are a contract failure
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/contents/{content_id}"),
        &json!({"status": "bogus"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/api/contents/{content_id}"),
        &json!({"status": "published"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "published");
    assert_eq!(updated["title"], "Hello");

    let (_, cat_a) = send_json(
        &app,
        "POST",
        "/api/categories",
        &json!({"name": "News", "slug": "news"}),
    )
    .await;
    let (_, cat_b) = send_json(
        &app,
        "POST",
        "/api/categories",
        &json!({"name": "Tech", "slug": "tech"}),
    )
    .await;
    let cat_a_id = cat_a["id"].as_i64().unwrap();
    let cat_b_id = cat_b["id"].as_i64().unwrap();

    let (status, ids) = send_json(
        &app,
        "PUT",
        &format!("/api/contents/{content_id}/categories"),
        &json!([cat_a_id, cat_b_id]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids, json!([cat_a_id, cat_b_id]));

    // Replacement is total, not additive
    let (status, ids) = send_json(
        &app,
        "PUT",
        &format!("/api/contents/{content_id}/categories"),
        &json!([cat_b_id]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids, json!([cat_b_id]));

    let (status, ids) = get(&app, &format!("/api/contents/{content_id}/categories")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids, json!([cat_b_id]));

    let (_, tag) = send_json(
        &app,
        "POST",
        "/api/tags",
        &json!({"name": "Rust", "slug": "rust"}),
    )
    .await;
    let tag_id = tag["id"].as_i64().unwrap();

    let (status, ids) = send_json(
        &app,
        "PUT",
        &format!("/api/contents/{content_id}/tags"),
        &json!([tag_id]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids, json!([tag_id]));

    // Join endpoints 404 for unknown content
    let (status, _) = get(&app, "/api/contents/9999/tags").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_menu_items_scoped_and_ordered() {
    let app = spawn_app().await;

    let (_, main_menu) = send_json(&app, "POST", "/api/menus", &json!({"name": "Main"})).await;
    let (_, footer_menu) = send_json(&app, "POST", "/api/menus", &json!({"name": "Footer"})).await;
    let main_id = main_menu["id"].as_i64().unwrap();
    let footer_id = footer_menu["id"].as_i64().unwrap();

    let (status, second) = send_json(
        &app,
        "POST",
        "/api/menu-items",
        &json!({"menu_id": main_id, "label": "About", "order": 2}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["target"], "_self");

    send_json(
        &app,
        "POST",
        "/api/menu-items",
        &json!({"menu_id": main_id, "label": "Home", "url": "/", "order": 1}),
    )
    .await;
    send_json(
        &app,
        "POST",
        "/api/menu-items",
        &json!({"menu_id": footer_id, "label": "Imprint", "order": 0}),
    )
    .await;

    let (status, items) = get(&app, &format!("/api/menu-items?menu_id={main_id}")).await;
    assert_eq!(status, StatusCode::OK);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["label"], "Home");
    assert_eq!(items[1]["label"], "About");

    // menu_id is mandatory for listing
    let (status, _) = get(&app, "/api/menu-items").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Items cannot reference a missing menu
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/menu-items",
        &json!({"menu_id": 9999, "label": "Lost"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_settings_keyed_semantics() {
    let app = spawn_app().await;

    let (status, setting) = send_json(
        &app,
        "POST",
        "/api/settings",
        &json!({"key": "site_title", "value": "My Site"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(setting["data_type"], "string");
    let id = setting["id"].as_i64().unwrap();

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/settings",
        &json!({"key": "site_title", "value": "Other"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/api/settings/{id}"),
        &json!({"value": "Renamed Site"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["value"], "Renamed Site");
    assert_eq!(updated["key"], "site_title");
}

#[tokio::test]
async fn test_media_annotation_updates() {
    let app = spawn_app().await;

    let (status, media) = send_json(
        &app,
        "POST",
        "/api/media",
        &json!({"filename": "a.png", "file_path": "/uploads/a.png", "size": 1024}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = media["id"].as_i64().unwrap();

    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/api/media/{id}"),
        &json!({"alt_text": "A diagram"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["alt_text"], "A diagram");
    assert_eq!(updated["filename"], "a.png");
    assert_eq!(updated["size"], 1024);
}

#[tokio::test]
async fn test_pagination() {
    let app = spawn_app().await;

    for i in 0..5 {
        let (status, _) = send_json(
            &app,
            "POST",
            "/api/tags",
            &json!({"name": format!("Tag {i}"), "slug": format!("tag-{i}")}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, page) = get(&app, "/api/tags?skip=2&limit=2").await;
    let page = page.as_array().unwrap().clone();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["slug"], "tag-2");
    assert_eq!(page[1]["slug"], "tag-3");
}
