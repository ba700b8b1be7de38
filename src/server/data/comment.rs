//! Comment repository.

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

/// Read access to `smiler_comment` rows.
pub struct CommentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CommentRepository<'a, C> {
    /// Creates a new instance of [`CommentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Returns the comments of a rate, oldest first
    pub async fn get_by_rate_id(
        &self,
        rate_id: i32,
    ) -> Result<Vec<entity::smiler_comment::Model>, DbErr> {
        entity::prelude::SmilerComment::find()
            .filter(entity::smiler_comment::Column::RateId.eq(rate_id))
            .order_by_asc(entity::smiler_comment::Column::CreatedAt)
            .order_by_asc(entity::smiler_comment::Column::Id)
            .all(self.db)
            .await
    }
}
