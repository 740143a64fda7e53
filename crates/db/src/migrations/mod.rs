//! Database migrations.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_author_table;
mod m20250601_000002_create_startup_table;
mod m20250601_000003_create_vote_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_author_table::Migration),
            Box::new(m20250601_000002_create_startup_table::Migration),
            Box::new(m20250601_000003_create_vote_table::Migration),
        ]
    }
}
