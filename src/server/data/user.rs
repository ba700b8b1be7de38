//! User repository.

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, QueryOrder};

/// Read access to `smiler_user` rows.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Fetches a single user.
    ///
    /// # Arguments
    /// - `user_id` - Primary key of the user
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - User exists
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Query failed
    pub async fn get(&self, user_id: i32) -> Result<Option<entity::smiler_user::Model>, DbErr> {
        entity::prelude::SmilerUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    /// Returns all users, highest rating first
    pub async fn get_all_by_rating(&self) -> Result<Vec<entity::smiler_user::Model>, DbErr> {
        entity::prelude::SmilerUser::find()
            .order_by_desc(entity::smiler_user::Column::Rating)
            .order_by_asc(entity::smiler_user::Column::Id)
            .all(self.db)
            .await
    }
}
