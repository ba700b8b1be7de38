use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251017_000001_smiler_user::SmilerUser, m20251017_000002_smiler_rate::SmilerRate,
};

static IDX_COMMENT_RATE_ID: &str = "idx_smiler_comment_rate_id";
static FK_COMMENT_AUTHOR_ID: &str = "fk_smiler_comment_author_id";
static FK_COMMENT_RATE_ID: &str = "fk_smiler_comment_rate_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SmilerComment::Table)
                    .if_not_exists()
                    .col(pk_auto(SmilerComment::Id))
                    .col(integer(SmilerComment::AuthorId))
                    .col(integer(SmilerComment::RateId))
                    .col(text(SmilerComment::Text))
                    .col(integer(SmilerComment::Rating))
                    .col(timestamp(SmilerComment::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMMENT_AUTHOR_ID)
                            .from(SmilerComment::Table, SmilerComment::AuthorId)
                            .to(SmilerUser::Table, SmilerUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_COMMENT_RATE_ID)
                            .from(SmilerComment::Table, SmilerComment::RateId)
                            .to(SmilerRate::Table, SmilerRate::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COMMENT_RATE_ID)
                    .table(SmilerComment::Table)
                    .col(SmilerComment::RateId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COMMENT_RATE_ID)
                    .table(SmilerComment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SmilerComment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum SmilerComment {
    Table,
    Id,
    AuthorId,
    RateId,
    Text,
    Rating,
    CreatedAt,
}
