//! Environment provisioning.
//!
//! [`provision`] is the only constructor of [`TestContext`]. It checks the execution mode
//! marker before touching anything, claims the process-wide "provisioned" flag, and then
//! starts the database instance and the application within the provisioning time budget.

use std::sync::atomic::{AtomicBool, Ordering};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use smiler::server::{
    config::{Config, ExecutionMode},
    startup::{start_app, AppHandle},
};

use crate::{
    context::TestContext, error::TestError, instance::EphemeralDatabase, settings::TestSettings,
};

static PROVISIONED: AtomicBool = AtomicBool::new(false);

/// Fails unless the process is explicitly marked as a test process.
pub fn ensure_test_mode(mode: Option<ExecutionMode>) -> Result<(), TestError> {
    match mode {
        Some(mode) if mode.is_test() => Ok(()),
        Some(mode) => Err(TestError::NonTestEnvironment(mode.to_string())),
        None => Err(TestError::NonTestEnvironment("unset".to_string())),
    }
}

/// Provision the test environment.
///
/// # Returns
/// - `Ok(TestContext)` - Database instance and application are running, database is empty
/// - `Err(TestError::NonTestEnvironment)` - Process not marked as test; nothing was started
/// - `Err(TestError::AlreadyProvisioned)` - This process already provisioned once
/// - `Err(TestError::Timeout)` - Provisioning exceeded `settings.provision_timeout`; anything
///   started so far has been stopped
/// - `Err(_)` - Instance, database or application startup failed; anything started so far
///   has been stopped
pub async fn provision(settings: TestSettings) -> Result<TestContext, TestError> {
    crate::init_tracing();

    ensure_test_mode(settings.mode)?;

    if PROVISIONED.swap(true, Ordering::SeqCst) {
        return Err(TestError::AlreadyProvisioned);
    }

    let limit = settings.provision_timeout;

    // On timeout the startup future is dropped: the postgres child is killed on drop, temp
    // directories are removed and the dropped shutdown sender stops the application.
    match tokio::time::timeout(limit, start_environment(settings)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!(after = ?limit, "Provisioning timed out");
            Err(TestError::Timeout {
                stage: "provision",
                after: limit,
            })
        }
    }
}

async fn start_environment(settings: TestSettings) -> Result<TestContext, TestError> {
    let instance = EphemeralDatabase::start(&settings).await?;

    tracing::info!(
        backend = ?settings.backend,
        uri = %instance.uri(),
        "Ephemeral database started"
    );

    let config =
        Config::new(ExecutionMode::Test, instance.uri()).with_bind_addr(settings.app_port.loopback_addr());

    let app = match start_app(config).await {
        Ok(app) => app,
        Err(e) => {
            discard(None, instance).await;
            return Err(e.into());
        }
    };

    let db = match connect(instance.uri()).await {
        Ok(db) => db,
        Err(e) => {
            discard(Some(app), instance).await;
            return Err(e.into());
        }
    };

    tracing::info!(url = %app.url(), "Application under test started");

    Ok(TestContext::new(db, app, instance, settings))
}

/// Stop whatever was started before a provisioning failure. Cleanup errors are logged so
/// the original failure is the one returned.
async fn discard(app: Option<AppHandle>, instance: EphemeralDatabase) {
    if let Some(app) = app {
        if let Err(e) = app.shutdown().await {
            tracing::warn!("Failed to shut down application after provisioning failure: {}", e);
        }
    }
    let uri = instance.uri().to_string();
    if let Err(e) = instance.stop().await {
        tracing::warn!(
            uri = %uri,
            "Failed to stop database instance after provisioning failure: {}",
            e
        );
    }
}

async fn connect(uri: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(uri);
    opt.sqlx_logging(false);

    Database::connect(opt).await
}
