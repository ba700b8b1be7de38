use std::time::Duration;

use smiler::server::error::config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    /// The process is not marked as a test process; nothing was started.
    #[error(
        "Refusing to provision a test environment: execution mode is {0}, expected \"test\" \
        (set SMILER_ENV=test)"
    )]
    NonTestEnvironment(String),
    /// The environment was already provisioned once in this process.
    #[error("Test environment was already provisioned in this process")]
    AlreadyProvisioned,
    /// A harness stage exceeded its time budget.
    #[error("Test harness stage `{stage}` did not complete within {after:?}")]
    Timeout { stage: &'static str, after: Duration },
    /// The ephemeral database instance could not be started or stopped.
    #[error("Ephemeral database instance error: {0}")]
    Instance(String),
    /// The test context was still shared with a running task when teardown was due.
    #[error("Test context is still in use by a test case; cannot tear down")]
    ContextInUse,
    #[error(transparent)]
    Settings(#[from] ConfigError),
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    #[error(transparent)]
    App(#[from] smiler::server::error::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
