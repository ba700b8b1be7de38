//! Rate fixture utilities.

pub mod factory;

use sea_orm::{EntityTrait, IntoActiveModel, QueryOrder};

use crate::{context::TestContext, error::TestError};

use self::factory::{RateFixture, RateOverrides};

impl TestContext {
    pub fn rate(&self) -> RateFixtures<'_> {
        RateFixtures { ctx: self }
    }
}

pub struct RateFixtures<'a> {
    ctx: &'a TestContext,
}

impl<'a> RateFixtures<'a> {
    pub async fn insert(
        &self,
        rate: RateFixture,
    ) -> Result<entity::smiler_rate::Model, TestError> {
        Ok(
            entity::prelude::SmilerRate::insert(rate.into_active_model())
                .exec_with_returning(&self.ctx.db)
                .await?,
        )
    }

    /// Insert a generated rate. The referenced author must already exist.
    pub async fn insert_generated(
        &self,
        overrides: Option<RateOverrides>,
    ) -> Result<entity::smiler_rate::Model, TestError> {
        self.insert(factory::generate(overrides)).await
    }

    /// Insert a generated user, then a generated rate written by that user.
    ///
    /// An `author_id` in `overrides` is ignored.
    pub async fn insert_with_author(
        &self,
        overrides: Option<RateOverrides>,
    ) -> Result<(entity::smiler_user::Model, entity::smiler_rate::Model), TestError> {
        let author = self.ctx.user().insert_generated(None).await?;

        let mut rate = factory::generate(overrides);
        rate.author_id = author.id;
        let rate = self.insert(rate).await?;

        Ok((author, rate))
    }

    /// Every persisted rate ordered by id
    pub async fn all(&self) -> Result<Vec<entity::smiler_rate::Model>, TestError> {
        Ok(entity::prelude::SmilerRate::find()
            .order_by_asc(entity::smiler_rate::Column::Id)
            .all(&self.ctx.db)
            .await?)
    }
}
