pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_users_table;
mod m20260301_000002_create_games_table;
mod m20260301_000003_create_releases_table;
mod m20260301_000004_create_revision_tables;
mod m20260301_000005_create_screenshots_table;
mod m20260301_000006_create_ratings_and_reviews_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users_table::Migration),
            Box::new(m20260301_000002_create_games_table::Migration),
            Box::new(m20260301_000003_create_releases_table::Migration),
            Box::new(m20260301_000004_create_revision_tables::Migration),
            Box::new(m20260301_000005_create_screenshots_table::Migration),
            Box::new(m20260301_000006_create_ratings_and_reviews_tables::Migration),
        ]
    }
}
