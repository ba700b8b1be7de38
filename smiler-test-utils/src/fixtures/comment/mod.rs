//! Comment fixture utilities.

pub mod factory;

use sea_orm::{EntityTrait, IntoActiveModel, QueryOrder};

use crate::{context::TestContext, error::TestError};

use self::factory::{CommentFixture, CommentOverrides};

impl TestContext {
    pub fn comment(&self) -> CommentFixtures<'_> {
        CommentFixtures { ctx: self }
    }
}

pub struct CommentFixtures<'a> {
    ctx: &'a TestContext,
}

impl<'a> CommentFixtures<'a> {
    pub async fn insert(
        &self,
        comment: CommentFixture,
    ) -> Result<entity::smiler_comment::Model, TestError> {
        Ok(
            entity::prelude::SmilerComment::insert(comment.into_active_model())
                .exec_with_returning(&self.ctx.db)
                .await?,
        )
    }

    /// Insert a generated comment. The referenced author and rate must already exist.
    pub async fn insert_generated(
        &self,
        overrides: Option<CommentOverrides>,
    ) -> Result<entity::smiler_comment::Model, TestError> {
        self.insert(factory::generate(overrides)).await
    }

    /// Insert a rate with its author, then a generated comment on that rate by the same
    /// author.
    ///
    /// `author_id` and `rate_id` in `overrides` are ignored.
    pub async fn insert_with_parents(
        &self,
        overrides: Option<CommentOverrides>,
    ) -> Result<
        (
            entity::smiler_user::Model,
            entity::smiler_rate::Model,
            entity::smiler_comment::Model,
        ),
        TestError,
    > {
        let (author, rate) = self.ctx.rate().insert_with_author(None).await?;

        let mut comment = factory::generate(overrides);
        comment.author_id = author.id;
        comment.rate_id = rate.id;
        let comment = self.insert(comment).await?;

        Ok((author, rate, comment))
    }

    /// Every persisted comment ordered by id
    pub async fn all(&self) -> Result<Vec<entity::smiler_comment::Model>, TestError> {
        Ok(entity::prelude::SmilerComment::find()
            .order_by_asc(entity::smiler_comment::Column::Id)
            .all(&self.ctx.db)
            .await?)
    }
}
