//! Test context structure and utilities.
//!
//! [`TestContext`] is the environment handle produced by [`provision`](crate::provision).
//! It owns the ephemeral database instance, the running application and the harness' own
//! database connection, and is handed to every test case explicitly.

use sea_orm::DatabaseConnection;
use smiler::server::startup::AppHandle;

use crate::{error::TestError, instance::EphemeralDatabase, settings::TestSettings};

/// Environment handle for one test run.
///
/// Cases may read and use everything here; only [`TestContext::after_all_cases`] tears it
/// down.
///
/// ```ignore
/// let ctx = provision(TestSettings::for_tests()).await?;
///
/// ctx.before_each_case().await?;
/// let user = ctx.user().insert_generated(None).await?;
/// let resp = ctx.get(&format!("/api/users/{}", user.id)).await?;
///
/// ctx.after_all_cases().await?;
/// ```
pub struct TestContext {
    /// Harness connection to the logical test database
    pub db: DatabaseConnection,

    pub(crate) app: AppHandle,
    pub(crate) instance: EphemeralDatabase,
    pub(crate) settings: TestSettings,
    pub(crate) http: reqwest::Client,
}

impl TestContext {
    pub(crate) fn new(
        db: DatabaseConnection,
        app: AppHandle,
        instance: EphemeralDatabase,
        settings: TestSettings,
    ) -> Self {
        Self {
            db,
            app,
            instance,
            settings,
            http: reqwest::Client::new(),
        }
    }

    /// Running application under test
    pub fn app(&self) -> &AppHandle {
        &self.app
    }

    /// Ephemeral database instance backing the run
    pub fn instance(&self) -> &EphemeralDatabase {
        &self.instance
    }

    /// Connection URI published to the application
    pub fn database_uri(&self) -> &str {
        self.instance.uri()
    }

    pub fn settings(&self) -> &TestSettings {
        &self.settings
    }

    /// Absolute URL of `path` on the running application
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.app.url(), path)
    }

    /// Send a GET request to the running application
    pub async fn get(&self, path: &str) -> Result<reqwest::Response, TestError> {
        Ok(self.http.get(self.url(path)).send().await?)
    }

    /// Send a POST request without a body to the running application
    pub async fn post(&self, path: &str) -> Result<reqwest::Response, TestError> {
        Ok(self.http.post(self.url(path)).send().await?)
    }
}
