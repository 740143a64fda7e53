//! Create startup table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Startup::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Startup::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Startup::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Startup::Slug).string_len(128).not_null())
                    .col(ColumnDef::new(Startup::AuthorId).string_len(32).not_null())
                    .col(ColumnDef::new(Startup::Description).text().not_null())
                    .col(ColumnDef::new(Startup::Category).string_len(20).not_null())
                    .col(ColumnDef::new(Startup::Image).string_len(1024).not_null())
                    .col(ColumnDef::new(Startup::Pitch).text().not_null())
                    .col(
                        ColumnDef::new(Startup::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_startup_author")
                            .from(Startup::Table, Startup::AuthorId)
                            .to(Author::Table, Author::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_startup_author_id")
                    .table(Startup::Table)
                    .col(Startup::AuthorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_startup_slug")
                    .table(Startup::Table)
                    .col(Startup::Slug)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Startup::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Startup {
    Table,
    Id,
    Title,
    Slug,
    AuthorId,
    Description,
    Category,
    Image,
    Pitch,
    CreatedAt,
}

#[derive(Iden)]
enum Author {
    Table,
    Id,
}
