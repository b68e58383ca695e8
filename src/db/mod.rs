use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{
    categories, contents, media, menu_items, menus, roles, settings, tags, users,
};

pub mod migrator;
pub mod repositories;

pub use repositories::category::{CategoryPatch, NewCategory};
pub use repositories::content::{ContentPatch, NewContent};
pub use repositories::media::{MediaPatch, NewMedia};
pub use repositories::menu::{MenuItemPatch, MenuPatch, NewMenu, NewMenuItem};
pub use repositories::role::{NewRole, RolePatch};
pub use repositories::setting::{NewSetting, SettingPatch};
pub use repositories::tag::{NewTag, TagPatch};
pub use repositories::user::{NewUser, UserPatch};

/// Current time as an RFC 3339 UTC string, the format every timestamp
/// column stores.
pub(crate) fn now_utc() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn role_repo(&self) -> repositories::role::RoleRepository {
        repositories::role::RoleRepository::new(self.conn.clone())
    }

    fn category_repo(&self) -> repositories::category::CategoryRepository {
        repositories::category::CategoryRepository::new(self.conn.clone())
    }

    fn tag_repo(&self) -> repositories::tag::TagRepository {
        repositories::tag::TagRepository::new(self.conn.clone())
    }

    fn content_repo(&self) -> repositories::content::ContentRepository {
        repositories::content::ContentRepository::new(self.conn.clone())
    }

    fn media_repo(&self) -> repositories::media::MediaRepository {
        repositories::media::MediaRepository::new(self.conn.clone())
    }

    fn menu_repo(&self) -> repositories::menu::MenuRepository {
        repositories::menu::MenuRepository::new(self.conn.clone())
    }

    fn setting_repo(&self) -> repositories::setting::SettingRepository {
        repositories::setting::SettingRepository::new(self.conn.clone())
    }

    // ========== Users ==========

    pub async fn list_users(&self, offset: u64, limit: u64) -> Result<Vec<users::Model>> {
        self.user_repo().list(offset, limit).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<users::Model>> {
        self.user_repo().get(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn create_user(&self, new: NewUser) -> Result<users::Model> {
        self.user_repo().create(new).await
    }

    pub async fn update_user(&self, id: i32, patch: UserPatch) -> Result<Option<users::Model>> {
        self.user_repo().update(id, patch).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        self.user_repo().delete(id).await
    }

    // ========== Roles ==========

    pub async fn list_roles(&self, offset: u64, limit: u64) -> Result<Vec<roles::Model>> {
        self.role_repo().list(offset, limit).await
    }

    pub async fn get_role(&self, id: i32) -> Result<Option<roles::Model>> {
        self.role_repo().get(id).await
    }

    pub async fn get_role_by_name(&self, name: &str) -> Result<Option<roles::Model>> {
        self.role_repo().get_by_name(name).await
    }

    pub async fn create_role(&self, new: NewRole) -> Result<roles::Model> {
        self.role_repo().create(new).await
    }

    pub async fn update_role(&self, id: i32, patch: RolePatch) -> Result<Option<roles::Model>> {
        self.role_repo().update(id, patch).await
    }

    pub async fn delete_role(&self, id: i32) -> Result<bool> {
        self.role_repo().delete(id).await
    }

    // ========== Categories ==========

    pub async fn list_categories(&self, offset: u64, limit: u64) -> Result<Vec<categories::Model>> {
        self.category_repo().list(offset, limit).await
    }

    pub async fn get_category(&self, id: i32) -> Result<Option<categories::Model>> {
        self.category_repo().get(id).await
    }

    pub async fn get_category_by_slug(&self, slug: &str) -> Result<Option<categories::Model>> {
        self.category_repo().get_by_slug(slug).await
    }

    pub async fn get_category_children(&self, parent_id: i32) -> Result<Vec<categories::Model>> {
        self.category_repo().children(parent_id).await
    }

    pub async fn create_category(&self, new: NewCategory) -> Result<categories::Model> {
        self.category_repo().create(new).await
    }

    pub async fn update_category(
        &self,
        id: i32,
        patch: CategoryPatch,
    ) -> Result<Option<categories::Model>> {
        self.category_repo().update(id, patch).await
    }

    pub async fn delete_category(&self, id: i32) -> Result<bool> {
        self.category_repo().delete(id).await
    }

    // ========== Tags ==========

    pub async fn list_tags(&self, offset: u64, limit: u64) -> Result<Vec<tags::Model>> {
        self.tag_repo().list(offset, limit).await
    }

    pub async fn get_tag(&self, id: i32) -> Result<Option<tags::Model>> {
        self.tag_repo().get(id).await
    }

    pub async fn get_tag_by_slug(&self, slug: &str) -> Result<Option<tags::Model>> {
        self.tag_repo().get_by_slug(slug).await
    }

    pub async fn create_tag(&self, new: NewTag) -> Result<tags::Model> {
        self.tag_repo().create(new).await
    }

    pub async fn update_tag(&self, id: i32, patch: TagPatch) -> Result<Option<tags::Model>> {
        self.tag_repo().update(id, patch).await
    }

    pub async fn delete_tag(&self, id: i32) -> Result<bool> {
        self.tag_repo().delete(id).await
    }

    // ========== Contents ==========

    pub async fn list_contents(&self, offset: u64, limit: u64) -> Result<Vec<contents::Model>> {
        self.content_repo().list(offset, limit).await
    }

    pub async fn get_content(&self, id: i32) -> Result<Option<contents::Model>> {
        self.content_repo().get(id).await
    }

    pub async fn get_content_by_slug(&self, slug: &str) -> Result<Option<contents::Model>> {
        self.content_repo().get_by_slug(slug).await
    }

    pub async fn create_content(&self, new: NewContent) -> Result<contents::Model> {
        self.content_repo().create(new).await
    }

    pub async fn update_content(
        &self,
        id: i32,
        patch: ContentPatch,
    ) -> Result<Option<contents::Model>> {
        self.content_repo().update(id, patch).await
    }

    pub async fn delete_content(&self, id: i32) -> Result<bool> {
        self.content_repo().delete(id).await
    }

    pub async fn get_content_category_ids(&self, content_id: i32) -> Result<Vec<i32>> {
        self.content_repo().category_ids(content_id).await
    }

    pub async fn get_content_tag_ids(&self, content_id: i32) -> Result<Vec<i32>> {
        self.content_repo().tag_ids(content_id).await
    }

    pub async fn replace_content_categories(
        &self,
        content_id: i32,
        category_ids: &[i32],
    ) -> Result<()> {
        self.content_repo()
            .replace_categories(content_id, category_ids)
            .await
    }

    pub async fn replace_content_tags(&self, content_id: i32, tag_ids: &[i32]) -> Result<()> {
        self.content_repo().replace_tags(content_id, tag_ids).await
    }

    // ========== Media ==========

    pub async fn list_media(&self, offset: u64, limit: u64) -> Result<Vec<media::Model>> {
        self.media_repo().list(offset, limit).await
    }

    pub async fn get_media(&self, id: i32) -> Result<Option<media::Model>> {
        self.media_repo().get(id).await
    }

    pub async fn create_media(&self, new: NewMedia) -> Result<media::Model> {
        self.media_repo().create(new).await
    }

    pub async fn update_media(&self, id: i32, patch: MediaPatch) -> Result<Option<media::Model>> {
        self.media_repo().update(id, patch).await
    }

    pub async fn delete_media(&self, id: i32) -> Result<bool> {
        self.media_repo().delete(id).await
    }

    // ========== Menus ==========

    pub async fn list_menus(&self, offset: u64, limit: u64) -> Result<Vec<menus::Model>> {
        self.menu_repo().list(offset, limit).await
    }

    pub async fn get_menu(&self, id: i32) -> Result<Option<menus::Model>> {
        self.menu_repo().get(id).await
    }

    pub async fn create_menu(&self, new: NewMenu) -> Result<menus::Model> {
        self.menu_repo().create(new).await
    }

    pub async fn update_menu(&self, id: i32, patch: MenuPatch) -> Result<Option<menus::Model>> {
        self.menu_repo().update(id, patch).await
    }

    pub async fn delete_menu(&self, id: i32) -> Result<bool> {
        self.menu_repo().delete(id).await
    }

    // ========== Menu items ==========

    pub async fn list_menu_items(
        &self,
        menu_id: i32,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<menu_items::Model>> {
        self.menu_repo().list_items(menu_id, offset, limit).await
    }

    pub async fn get_menu_item(&self, id: i32) -> Result<Option<menu_items::Model>> {
        self.menu_repo().get_item(id).await
    }

    pub async fn create_menu_item(&self, new: NewMenuItem) -> Result<menu_items::Model> {
        self.menu_repo().create_item(new).await
    }

    pub async fn update_menu_item(
        &self,
        id: i32,
        patch: MenuItemPatch,
    ) -> Result<Option<menu_items::Model>> {
        self.menu_repo().update_item(id, patch).await
    }

    pub async fn delete_menu_item(&self, id: i32) -> Result<bool> {
        self.menu_repo().delete_item(id).await
    }

    // ========== Settings ==========

    pub async fn list_settings(&self, offset: u64, limit: u64) -> Result<Vec<settings::Model>> {
        self.setting_repo().list(offset, limit).await
    }

    pub async fn get_setting(&self, id: i32) -> Result<Option<settings::Model>> {
        self.setting_repo().get(id).await
    }

    pub async fn get_setting_by_key(&self, key: &str) -> Result<Option<settings::Model>> {
        self.setting_repo().get_by_key(key).await
    }

    pub async fn create_setting(&self, new: NewSetting) -> Result<settings::Model> {
        self.setting_repo().create(new).await
    }

    pub async fn update_setting(
        &self,
        id: i32,
        patch: SettingPatch,
    ) -> Result<Option<settings::Model>> {
        self.setting_repo().update(id, patch).await
    }

    pub async fn delete_setting(&self, id: i32) -> Result<bool> {
        self.setting_repo().delete(id).await
    }
}
