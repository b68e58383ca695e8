pub mod category;
pub mod content;
pub mod media;
pub mod menu;
pub mod role;
pub mod setting;
pub mod tag;
pub mod user;
