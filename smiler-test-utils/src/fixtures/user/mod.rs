//! User fixture utilities.
//!
//! `factory` generates in-memory users; [`UserFixtures`] persists them through the
//! harness' database connection.

pub mod factory;

use sea_orm::{EntityTrait, IntoActiveModel, QueryOrder};

use crate::{context::TestContext, error::TestError};

use self::factory::{UserFixture, UserOverrides};

impl TestContext {
    pub fn user(&self) -> UserFixtures<'_> {
        UserFixtures { ctx: self }
    }
}

pub struct UserFixtures<'a> {
    ctx: &'a TestContext,
}

impl<'a> UserFixtures<'a> {
    pub async fn insert(
        &self,
        user: UserFixture,
    ) -> Result<entity::smiler_user::Model, TestError> {
        Ok(
            entity::prelude::SmilerUser::insert(user.into_active_model())
                .exec_with_returning(&self.ctx.db)
                .await?,
        )
    }

    pub async fn insert_generated(
        &self,
        overrides: Option<UserOverrides>,
    ) -> Result<entity::smiler_user::Model, TestError> {
        self.insert(factory::generate(overrides)).await
    }

    /// Every persisted user ordered by id
    pub async fn all(&self) -> Result<Vec<entity::smiler_user::Model>, TestError> {
        Ok(entity::prelude::SmilerUser::find()
            .order_by_asc(entity::smiler_user::Column::Id)
            .all(&self.ctx.db)
            .await?)
    }
}
