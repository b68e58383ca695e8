pub use super::categories::Entity as Categories;
pub use super::content_categories::Entity as ContentCategories;
pub use super::content_tags::Entity as ContentTags;
pub use super::contents::Entity as Contents;
pub use super::media::Entity as Media;
pub use super::menu_items::Entity as MenuItems;
pub use super::menus::Entity as Menus;
pub use super::roles::Entity as Roles;
pub use super::settings::Entity as Settings;
pub use super::tags::Entity as Tags;
pub use super::users::Entity as Users;
