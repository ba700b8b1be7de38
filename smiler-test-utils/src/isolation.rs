//! Per-case isolation and suite teardown.
//!
//! Every case shares one database instance. Isolation is achieved by dropping every table
//! of the logical database before each case and re-applying the schema, not by starting a
//! new instance per case.

use migration::{Migrator, MigratorTrait};
use sea_orm::{DatabaseConnection, DbErr};

use crate::{context::TestContext, error::TestError};

/// Drop every table of the connected database, then re-create the schema empty.
pub async fn drop_all_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::fresh(db).await
}

impl TestContext {
    /// Wipe the database so the next case starts from an empty store.
    ///
    /// Must be awaited before the case body runs. Bounded by `isolation_timeout`.
    pub async fn before_each_case(&self) -> Result<(), TestError> {
        let limit = self.settings.isolation_timeout;

        tokio::time::timeout(limit, drop_all_tables(&self.db))
            .await
            .map_err(|_| TestError::Timeout {
                stage: "isolation",
                after: limit,
            })??;

        tracing::debug!(database = %self.instance.database_name(), "Dropped all tables");

        Ok(())
    }

    /// Stop the application, close every connection and discard the database instance.
    ///
    /// Every step is attempted even if an earlier one fails; the first failure is returned.
    /// Bounded by `teardown_timeout`.
    pub async fn after_all_cases(self) -> Result<(), TestError> {
        let limit = self.settings.teardown_timeout;

        match tokio::time::timeout(limit, self.teardown()).await {
            Ok(result) => result,
            Err(_) => Err(TestError::Timeout {
                stage: "teardown",
                after: limit,
            }),
        }
    }

    async fn teardown(self) -> Result<(), TestError> {
        let Self {
            db,
            app,
            instance,
            http,
            ..
        } = self;
        // Pooled keep-alive connections would otherwise hold the graceful shutdown open
        drop(http);

        let app_result = app.shutdown().await.map_err(TestError::from);
        let db_result = db.close().await.map_err(TestError::from);
        let instance_result = instance.stop().await;

        tracing::info!("Test environment torn down");

        app_result.and(db_result).and(instance_result)
    }
}
