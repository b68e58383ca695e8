use contentd::Store;
use contentd::db::{
    CategoryPatch, NewCategory, NewContent, NewMenu, NewMenuItem, NewUser, UserPatch,
};
use contentd::entities::contents::{ContentStatus, ContentType};

async fn memory_store() -> Store {
    Store::new("sqlite::memory:")
        .await
        .expect("Failed to open in-memory store")
}

fn sample_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        name: Some("Sample".to_string()),
        username: None,
        password_hash: None,
        is_active: true,
        is_superuser: false,
        role_id: None,
    }
}

#[tokio::test]
async fn test_user_round_trip() {
    let store = memory_store().await;

    let created = store.create_user(sample_user("a@example.com")).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = store.get_user(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.email, "a@example.com");

    let by_email = store.get_user_by_email("a@example.com").await.unwrap();
    assert_eq!(by_email.unwrap().id, created.id);

    assert!(store.get_user_by_email("b@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_empty_patch_refreshes_updated_at_only() {
    let store = memory_store().await;

    let created = store.create_user(sample_user("a@example.com")).await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let updated = store
        .update_user(created.id, UserPatch::default())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.email, created.email);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.created_at, created.created_at);
    assert_ne!(updated.updated_at, created.updated_at);
}

#[tokio::test]
async fn test_patch_preserves_sibling_fields() {
    let store = memory_store().await;

    let created = store.create_user(sample_user("a@example.com")).await.unwrap();

    let patch = UserPatch {
        name: Some(Some("Renamed".to_string())),
        ..Default::default()
    };
    let updated = store.update_user(created.id, patch).await.unwrap().unwrap();
    assert_eq!(updated.name.as_deref(), Some("Renamed"));
    assert_eq!(updated.email, "a@example.com");
    assert!(updated.is_active);

    // Explicit null through the inner option
    let patch = UserPatch {
        name: Some(None),
        ..Default::default()
    };
    let updated = store.update_user(created.id, patch).await.unwrap().unwrap();
    assert_eq!(updated.name, None);
}

#[tokio::test]
async fn test_update_and_delete_missing_rows() {
    let store = memory_store().await;

    let updated = store.update_user(42, UserPatch::default()).await.unwrap();
    assert!(updated.is_none());

    assert!(!store.delete_user(42).await.unwrap());

    let created = store.create_user(sample_user("a@example.com")).await.unwrap();
    assert!(store.delete_user(created.id).await.unwrap());
    assert!(!store.delete_user(created.id).await.unwrap());
}

#[tokio::test]
async fn test_list_offset_and_limit() {
    let store = memory_store().await;

    for i in 0..4 {
        store
            .create_user(sample_user(&format!("u{i}@example.com")))
            .await
            .unwrap();
    }

    let all = store.list_users(0, 100).await.unwrap();
    assert_eq!(all.len(), 4);

    let page = store.list_users(1, 2).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].email, "u1@example.com");
}

#[tokio::test]
async fn test_category_children() {
    let store = memory_store().await;

    let root = store
        .create_category(NewCategory {
            name: "Root".to_string(),
            slug: "root".to_string(),
            description: None,
            parent_id: None,
            order: 0,
            is_active: true,
        })
        .await
        .unwrap();

    for (i, slug) in ["a", "b"].iter().enumerate() {
        store
            .create_category(NewCategory {
                name: slug.to_uppercase(),
                slug: (*slug).to_string(),
                description: None,
                parent_id: Some(root.id),
                order: i as i32,
                is_active: true,
            })
            .await
            .unwrap();
    }

    let children = store.get_category_children(root.id).await.unwrap();
    assert_eq!(children.len(), 2);
    assert!(children.iter().all(|c| c.parent_id == Some(root.id)));

    // Re-parenting via patch
    let patch = CategoryPatch {
        parent_id: Some(None),
        ..Default::default()
    };
    let child_id = children[0].id;
    let orphaned = store.update_category(child_id, patch).await.unwrap().unwrap();
    assert_eq!(orphaned.parent_id, None);
    assert_eq!(store.get_category_children(root.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_content_join_replacement() {
    let store = memory_store().await;

    let author = store.create_user(sample_user("a@example.com")).await.unwrap();
    let content = store
        .create_content(NewContent {
            title: "Post".to_string(),
            slug: "post".to_string(),
            body: None,
            excerpt: None,
            author_id: author.id,
            status: ContentStatus::Draft,
            content_type: ContentType::Post,
            featured_image_id: None,
        })
        .await
        .unwrap();

    assert_eq!(content.views_count, 0);
    assert!(content.published_at.is_none());

    let mut cat_ids = Vec::new();
    for slug in ["x", "y", "z"] {
        let cat = store
            .create_category(NewCategory {
                name: slug.to_uppercase(),
                slug: slug.to_string(),
                description: None,
                parent_id: None,
                order: 0,
                is_active: true,
            })
            .await
            .unwrap();
        cat_ids.push(cat.id);
    }

    store
        .replace_content_categories(content.id, &cat_ids)
        .await
        .unwrap();
    assert_eq!(
        store.get_content_category_ids(content.id).await.unwrap(),
        cat_ids
    );

    store
        .replace_content_categories(content.id, &cat_ids[1..2])
        .await
        .unwrap();
    assert_eq!(
        store.get_content_category_ids(content.id).await.unwrap(),
        vec![cat_ids[1]]
    );

    store.replace_content_categories(content.id, &[]).await.unwrap();
    assert!(store
        .get_content_category_ids(content.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_menu_item_listing_order() {
    let store = memory_store().await;

    let menu = store
        .create_menu(NewMenu {
            name: "Main".to_string(),
            location: None,
        })
        .await
        .unwrap();

    for (label, order) in [("c", 30), ("a", 10), ("b", 20)] {
        store
            .create_menu_item(NewMenuItem {
                menu_id: menu.id,
                parent_id: None,
                label: label.to_string(),
                url: None,
                target: "_self".to_string(),
                icon: None,
                order,
                is_active: true,
            })
            .await
            .unwrap();
    }

    let items = store.list_menu_items(menu.id, 0, 100).await.unwrap();
    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_ping() {
    let store = memory_store().await;
    store.ping().await.unwrap();
}
