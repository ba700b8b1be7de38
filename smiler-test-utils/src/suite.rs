//! Sequential suite runner.
//!
//! Cargo runs each `#[tokio::test]` independently, so the suite-level lifecycle (provision
//! once, wipe before every case, tear down after the last case) is driven here instead.
//!
//! ```ignore
//! #[tokio::test]
//! async fn users() -> Result<(), TestError> {
//!     TestSuite::new(TestSettings::for_tests())
//!         .case("creates a user", |ctx| async move {
//!             ctx.user().insert_generated(None).await?;
//!             Ok(())
//!         })
//!         .case("starts empty", |ctx| async move {
//!             assert!(ctx.user().all().await?.is_empty());
//!             Ok(())
//!         })
//!         .run()
//!         .await?
//!         .assert_passed();
//!     Ok(())
//! }
//! ```

use std::{any::Any, fmt, future::Future, pin::Pin, sync::Arc};

use crate::{context::TestContext, error::TestError, provision::provision, settings::TestSettings};

type CaseFuture = Pin<Box<dyn Future<Output = Result<(), TestError>> + Send>>;
type CaseFn = Box<dyn FnOnce(Arc<TestContext>) -> CaseFuture + Send>;

/// A list of cases run sequentially against one provisioned environment.
pub struct TestSuite {
    settings: TestSettings,
    cases: Vec<(String, CaseFn)>,
}

impl TestSuite {
    pub fn new(settings: TestSettings) -> Self {
        Self {
            settings,
            cases: Vec::new(),
        }
    }

    /// Register a case. Cases run in registration order.
    pub fn case<F, Fut>(mut self, name: impl Into<String>, case: F) -> Self
    where
        F: FnOnce(Arc<TestContext>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), TestError>> + Send + 'static,
    {
        let case: CaseFn = Box::new(move |ctx| Box::pin(case(ctx)));
        self.cases.push((name.into(), case));
        self
    }

    /// Provision, run every case with a wipe before each, then tear down.
    ///
    /// A failing or panicking case is recorded in the report and the next case still runs.
    /// A harness failure (wipe error or timeout) stops the remaining cases; teardown is
    /// still attempted and the harness error is returned.
    pub async fn run(self) -> Result<SuiteReport, TestError> {
        let ctx = Arc::new(provision(self.settings).await?);
        let mut report = SuiteReport::default();
        let mut aborted = None;

        for (name, case) in self.cases {
            if let Err(e) = ctx.before_each_case().await {
                tracing::error!(case = %name, "Isolation failed: {}", e);
                aborted = Some(e);
                break;
            }

            let outcome = match tokio::spawn(case(Arc::clone(&ctx))).await {
                Ok(Ok(())) => CaseOutcome::Passed,
                Ok(Err(e)) => CaseOutcome::Failed(e.to_string()),
                Err(e) if e.is_panic() => CaseOutcome::Failed(panic_message(e.into_panic())),
                Err(e) => CaseOutcome::Failed(e.to_string()),
            };

            tracing::info!(case = %name, outcome = %outcome, "Case finished");
            report.cases.push((name, outcome));
        }

        let teardown = match Arc::try_unwrap(ctx) {
            Ok(ctx) => ctx.after_all_cases().await,
            Err(_) => Err(TestError::ContextInUse),
        };

        if let Some(e) = aborted {
            return Err(e);
        }
        teardown?;

        Ok(report)
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {}", message)
    } else {
        "panicked".to_string()
    }
}

/// Result of a single case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Passed,
    Failed(String),
}

impl fmt::Display for CaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.write_str("passed"),
            Self::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Outcomes of every case that ran, in order.
#[derive(Debug, Default)]
pub struct SuiteReport {
    pub cases: Vec<(String, CaseOutcome)>,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.cases
            .iter()
            .all(|(_, outcome)| *outcome == CaseOutcome::Passed)
    }

    pub fn failures(&self) -> Vec<(&str, &str)> {
        self.cases
            .iter()
            .filter_map(|(name, outcome)| match outcome {
                CaseOutcome::Failed(reason) => Some((name.as_str(), reason.as_str())),
                CaseOutcome::Passed => None,
            })
            .collect()
    }

    /// # Panics
    /// Panics listing every failed case if any case failed
    pub fn assert_passed(&self) {
        let failures = self.failures();
        if !failures.is_empty() {
            let lines: Vec<String> = failures
                .iter()
                .map(|(name, reason)| format!("  {}: {}", name, reason))
                .collect();
            panic!("{} test case(s) failed:\n{}", failures.len(), lines.join("\n"));
        }
    }
}
