pub mod prelude;

pub mod categories;
pub mod content_categories;
pub mod content_tags;
pub mod contents;
pub mod media;
pub mod menu_items;
pub mod menus;
pub mod roles;
pub mod settings;
pub mod tags;
pub mod users;
