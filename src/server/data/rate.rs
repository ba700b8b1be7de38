//! Rate repository.

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, QueryOrder};

/// Read access to `smiler_rate` rows.
pub struct RateRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RateRepository<'a, C> {
    /// Creates a new instance of [`RateRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Fetches a single rate.
    ///
    /// # Arguments
    /// - `rate_id` - Primary key of the rate
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - Rate exists
    /// - `Ok(None)` - No rate with that ID
    /// - `Err(DbErr)` - Query failed
    pub async fn get(&self, rate_id: i32) -> Result<Option<entity::smiler_rate::Model>, DbErr> {
        entity::prelude::SmilerRate::find_by_id(rate_id)
            .one(self.db)
            .await
    }

    /// Returns all rates, newest first
    pub async fn get_newest(&self) -> Result<Vec<entity::smiler_rate::Model>, DbErr> {
        entity::prelude::SmilerRate::find()
            .order_by_desc(entity::smiler_rate::Column::CreatedAt)
            .order_by_desc(entity::smiler_rate::Column::Id)
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use sea_orm::DbErr;

    use crate::server::{
        data::rate::RateRepository,
        util::test::{db_test_setup, insert_rate, insert_user},
    };

    /// Expect newest rates first
    #[tokio::test]
    async fn orders_rates_newest_first() -> Result<(), DbErr> {
        let db = db_test_setup().await?;
        let author = insert_user(&db, "author", 0).await?;
        let old = insert_rate(&db, author.id, Duration::days(2)).await?;
        let new = insert_rate(&db, author.id, Duration::minutes(5)).await?;

        let rates = RateRepository::new(&db).get_newest().await?;
        let ids: Vec<i32> = rates.iter().map(|r| r.id).collect();

        assert_eq!(ids, vec![new.id, old.id]);

        Ok(())
    }

    /// Expect Err when the author does not exist
    #[tokio::test]
    async fn rejects_rate_with_missing_author() -> Result<(), DbErr> {
        let db = db_test_setup().await?;

        let result = insert_rate(&db, 99, Duration::zero()).await;

        assert!(result.is_err());

        Ok(())
    }

    /// Expect Ok(None) when rate is not found
    #[tokio::test]
    async fn returns_none_for_nonexistent_rate() -> Result<(), DbErr> {
        let db = db_test_setup().await?;

        let result = RateRepository::new(&db).get(7).await?;

        assert!(result.is_none());

        Ok(())
    }
}
