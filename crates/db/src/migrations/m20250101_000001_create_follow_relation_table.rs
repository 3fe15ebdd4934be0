//! Create follow relation table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FollowRelation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FollowRelation::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FollowRelation::Follower).string_len(256).not_null())
                    .col(ColumnDef::new(FollowRelation::Followee).string_len(256).not_null())
                    .col(
                        ColumnDef::new(FollowRelation::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (follower, followee). Not unique: a retried follow may leave
        // a second row, which the next unfollow sweeps.
        manager
            .create_index(
                Index::create()
                    .name("idx_follow_relation_follower_followee")
                    .table(FollowRelation::Table)
                    .col(FollowRelation::Follower)
                    .col(FollowRelation::Followee)
                    .to_owned(),
            )
            .await?;

        // Index: followee (for listing followers)
        manager
            .create_index(
                Index::create()
                    .name("idx_follow_relation_followee")
                    .table(FollowRelation::Table)
                    .col(FollowRelation::Followee)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FollowRelation::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FollowRelation {
    Table,
    Id,
    Follower,
    Followee,
    CreatedAt,
}
