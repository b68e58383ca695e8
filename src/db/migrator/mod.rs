use sea_orm_migration::prelude::*;

mod m20240101_cms_models;
mod m20240102_settings_menus;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_cms_models::Migration),
            Box::new(m20240102_settings_menus::Migration),
        ]
    }
}
