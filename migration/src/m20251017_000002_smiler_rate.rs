use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251017_000001_smiler_user::SmilerUser;

static IDX_RATE_AUTHOR_ID: &str = "idx_smiler_rate_author_id";
static FK_RATE_AUTHOR_ID: &str = "fk_smiler_rate_author_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Foreign keys are declared inline because SQLite cannot add them to an existing table.
        manager
            .create_table(
                Table::create()
                    .table(SmilerRate::Table)
                    .if_not_exists()
                    .col(pk_auto(SmilerRate::Id))
                    .col(integer(SmilerRate::AuthorId))
                    .col(string(SmilerRate::Title))
                    .col(text(SmilerRate::Text))
                    .col(integer(SmilerRate::Rating))
                    .col(integer(SmilerRate::Views))
                    .col(integer(SmilerRate::Comments))
                    .col(timestamp(SmilerRate::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_RATE_AUTHOR_ID)
                            .from(SmilerRate::Table, SmilerRate::AuthorId)
                            .to(SmilerUser::Table, SmilerUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RATE_AUTHOR_ID)
                    .table(SmilerRate::Table)
                    .col(SmilerRate::AuthorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_RATE_AUTHOR_ID)
                    .table(SmilerRate::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SmilerRate::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SmilerRate {
    Table,
    Id,
    AuthorId,
    Title,
    Text,
    Rating,
    Views,
    Comments,
    CreatedAt,
}
