//! Create vote table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vote::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vote::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vote::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Vote::StartupId).string_len(32).not_null())
                    .col(ColumnDef::new(Vote::VoteType).string_len(8).not_null())
                    .col(
                        ColumnDef::new(Vote::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Vote::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Vote::VoteType).is_in(["up", "down"]))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vote_author")
                            .from(Vote::Table, Vote::UserId)
                            .to(Author::Table, Author::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vote_startup")
                            .from(Vote::Table, Vote::StartupId)
                            .to(Startup::Table, Startup::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, startup_id) - one vote per user per startup.
        // The upsert in VoteRepository targets this index.
        manager
            .create_index(
                Index::create()
                    .name("idx_vote_user_startup")
                    .table(Vote::Table)
                    .col(Vote::UserId)
                    .col(Vote::StartupId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: (startup_id, vote_type) for count aggregation
        manager
            .create_index(
                Index::create()
                    .name("idx_vote_startup_type")
                    .table(Vote::Table)
                    .col(Vote::StartupId)
                    .col(Vote::VoteType)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vote::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Vote {
    Table,
    Id,
    UserId,
    StartupId,
    VoteType,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Author {
    Table,
    Id,
}

#[derive(Iden)]
enum Startup {
    Table,
    Id,
}
