use sea_orm_migration::{prelude::*, schema::*};

static IDX_USER_RATING: &str = "idx_smiler_user_rating";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SmilerUser::Table)
                    .if_not_exists()
                    .col(pk_auto(SmilerUser::Id))
                    .col(string_uniq(SmilerUser::Login))
                    .col(string_uniq(SmilerUser::Email))
                    .col(string(SmilerUser::Avatar))
                    .col(string(SmilerUser::Salt))
                    .col(string(SmilerUser::Hash))
                    .col(integer(SmilerUser::Rating))
                    .col(string(SmilerUser::DisplayName))
                    .col(text(SmilerUser::About))
                    .col(boolean(SmilerUser::NotifyEmail))
                    .col(boolean(SmilerUser::NotifyReplies))
                    .col(timestamp(SmilerUser::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_RATING)
                    .table(SmilerUser::Table)
                    .col(SmilerUser::Rating)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_USER_RATING)
                    .table(SmilerUser::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SmilerUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SmilerUser {
    Table,
    Id,
    Login,
    Email,
    Avatar,
    Salt,
    Hash,
    Rating,
    DisplayName,
    About,
    NotifyEmail,
    NotifyReplies,
    CreatedAt,
}
