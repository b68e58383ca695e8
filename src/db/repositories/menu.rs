use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::db::now_utc;
use crate::entities::{menu_items, menus, prelude::*};

pub struct NewMenu {
    pub name: String,
    pub location: Option<String>,
}

#[derive(Default)]
pub struct MenuPatch {
    pub name: Option<String>,
    pub location: Option<Option<String>>,
}

pub struct NewMenuItem {
    pub menu_id: i32,
    pub parent_id: Option<i32>,
    pub label: String,
    pub url: Option<String>,
    pub target: String,
    pub icon: Option<String>,
    pub order: i32,
    pub is_active: bool,
}

#[derive(Default)]
pub struct MenuItemPatch {
    pub parent_id: Option<Option<i32>>,
    pub label: Option<String>,
    pub url: Option<Option<String>>,
    pub target: Option<String>,
    pub icon: Option<Option<String>>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Menus and their items share one repository, mirroring the original
/// service boundary.
pub struct MenuRepository {
    conn: DatabaseConnection,
}

impl MenuRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, offset: u64, limit: u64) -> Result<Vec<menus::Model>> {
        let rows = Menus::find()
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list menus")?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<menus::Model>> {
        let menu = Menus::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query menu by ID")?;
        Ok(menu)
    }

    pub async fn create(&self, new: NewMenu) -> Result<menus::Model> {
        let now = now_utc();
        let model = menus::ActiveModel {
            name: Set(new.name),
            location: Set(new.location),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert menu")?;
        Ok(model)
    }

    pub async fn update(&self, id: i32, patch: MenuPatch) -> Result<Option<menus::Model>> {
        let Some(model) = Menus::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: menus::ActiveModel = model.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(location) = patch.location {
            active.location = Set(location);
        }
        active.updated_at = Set(now_utc());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update menu")?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Menus::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete menu")?;
        Ok(result.rows_affected > 0)
    }

    /// Items of one menu, ordered by their `order` column ascending.
    pub async fn list_items(
        &self,
        menu_id: i32,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<menu_items::Model>> {
        let rows = MenuItems::find()
            .filter(menu_items::Column::MenuId.eq(menu_id))
            .order_by_asc(menu_items::Column::Order)
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list menu items")?;
        Ok(rows)
    }

    pub async fn get_item(&self, id: i32) -> Result<Option<menu_items::Model>> {
        let item = MenuItems::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query menu item by ID")?;
        Ok(item)
    }

    pub async fn create_item(&self, new: NewMenuItem) -> Result<menu_items::Model> {
        let now = now_utc();
        let model = menu_items::ActiveModel {
            menu_id: Set(new.menu_id),
            parent_id: Set(new.parent_id),
            label: Set(new.label),
            url: Set(new.url),
            target: Set(new.target),
            icon: Set(new.icon),
            order: Set(new.order),
            is_active: Set(new.is_active),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert menu item")?;
        Ok(model)
    }

    pub async fn update_item(
        &self,
        id: i32,
        patch: MenuItemPatch,
    ) -> Result<Option<menu_items::Model>> {
        let Some(model) = MenuItems::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: menu_items::ActiveModel = model.into();
        if let Some(parent_id) = patch.parent_id {
            active.parent_id = Set(parent_id);
        }
        if let Some(label) = patch.label {
            active.label = Set(label);
        }
        if let Some(url) = patch.url {
            active.url = Set(url);
        }
        if let Some(target) = patch.target {
            active.target = Set(target);
        }
        if let Some(icon) = patch.icon {
            active.icon = Set(icon);
        }
        if let Some(order) = patch.order {
            active.order = Set(order);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(now_utc());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update menu item")?;
        Ok(Some(updated))
    }

    pub async fn delete_item(&self, id: i32) -> Result<bool> {
        let result = MenuItems::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete menu item")?;
        Ok(result.rows_affected > 0)
    }
}
