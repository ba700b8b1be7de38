//! Integration test harness for the Smiler backend.
//!
//! A test run goes through three phases:
//!
//! 1. [`provision`] starts an ephemeral database, derives a uniquely named logical database
//!    inside it and starts the application against it. It refuses to run unless the
//!    process is explicitly marked as a test process, and it runs at most once per process.
//! 2. Before every case, [`TestContext::before_each_case`] drops every table and re-applies
//!    the schema so no case observes another case's rows.
//! 3. [`TestContext::after_all_cases`] stops the application, closes connections and
//!    discards the database instance.
//!
//! [`TestSuite`] drives the three phases for a list of cases. The [`fixtures`] module
//! generates randomized, schema-valid records with typed overrides.

pub mod context;
pub mod error;
pub mod fixtures;
pub mod instance;
pub mod isolation;
pub mod provision;
pub mod settings;
pub mod suite;

pub use context::TestContext;
pub use error::TestError;
pub use provision::provision;
pub use settings::{DatabaseBackend, PortSelection, TestSettings};
pub use suite::{CaseOutcome, SuiteReport, TestSuite};

pub mod prelude {
    pub use crate::{
        fixtures::{
            comment::factory::{CommentFixture, CommentOverrides},
            merge::Merge,
            rate::factory::{RateFixture, RateOverrides, RateStats, RateStatsOverrides},
            user::factory::{
                NotificationOverrides, NotificationSettings, ProfileOverrides, UserFixture,
                UserOverrides, UserProfile,
            },
        },
        provision, DatabaseBackend, PortSelection, TestContext, TestError, TestSettings,
        TestSuite,
    };
    pub use smiler::server::config::ExecutionMode;
}

/// Install a tracing subscriber that writes through the test harness' captured output.
///
/// Honors `RUST_LOG` and defaults to `warn`. Safe to call repeatedly; only the first call
/// in a process installs the subscriber.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
