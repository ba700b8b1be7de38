//! Harness settings.
//!
//! Settings are plain values so tests can build them explicitly; [`TestSettings::from_env`]
//! reads the same values from environment variables for cargo-driven runs.

use std::{
    net::{SocketAddr, TcpListener},
    str::FromStr,
    time::Duration,
};

use smiler::server::{
    config::{ExecutionMode, ENV_EXECUTION_MODE},
    error::config::ConfigError,
};

/// Database backend selector (`sqlite` or `postgres`).
pub const ENV_TEST_DATABASE: &str = "SMILER_TEST_DATABASE";
/// Fixed port for the ephemeral Postgres instance; unset means an OS-assigned port.
pub const ENV_TEST_DATABASE_PORT: &str = "SMILER_TEST_DATABASE_PORT";
/// Fixed port for the application under test; unset means an OS-assigned port.
pub const ENV_TEST_APP_PORT: &str = "SMILER_TEST_APP_PORT";
/// Time budget in seconds applied to provisioning, per-case isolation and teardown.
pub const ENV_TEST_TIMEOUT_SECS: &str = "SMILER_TEST_TIMEOUT_SECS";

pub const DEFAULT_PROVISION_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_ISOLATION_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_TEARDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Kind of ephemeral database instance to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatabaseBackend {
    /// Database file in a private temporary directory.
    #[default]
    Sqlite,
    /// Private `postgres` server spawned from locally installed binaries.
    Postgres,
}

impl FromStr for DatabaseBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(ConfigError::InvalidEnvValue {
                var: ENV_TEST_DATABASE.to_string(),
                reason: format!("unknown database backend {other:?}"),
            }),
        }
    }
}

/// How a listening port is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PortSelection {
    /// Let the operating system pick a free port.
    #[default]
    Auto,
    /// Always use this port; startup fails if it is taken.
    Fixed(u16),
}

impl PortSelection {
    /// Port number to hand to a process that cannot report back the port it bound.
    ///
    /// `Auto` briefly binds port 0 to learn a free port, then releases it.
    pub fn reserve(self) -> std::io::Result<u16> {
        match self {
            Self::Fixed(port) => Ok(port),
            Self::Auto => {
                let listener = TcpListener::bind("127.0.0.1:0")?;
                let port = listener.local_addr()?.port();
                drop(listener);
                Ok(port)
            }
        }
    }

    /// Loopback address to bind directly; `Auto` binds port 0.
    pub fn loopback_addr(self) -> SocketAddr {
        let port = match self {
            Self::Fixed(port) => port,
            Self::Auto => 0,
        };
        SocketAddr::from(([127, 0, 0, 1], port))
    }
}

/// Settings for provisioning and running a test environment.
#[derive(Debug, Clone)]
pub struct TestSettings {
    /// Execution mode marker of the process; provisioning requires `Some(Test)`.
    pub mode: Option<ExecutionMode>,
    pub backend: DatabaseBackend,
    /// Port of the ephemeral database server (ignored by SQLite).
    pub database_port: PortSelection,
    /// Port of the application under test.
    pub app_port: PortSelection,
    pub provision_timeout: Duration,
    pub isolation_timeout: Duration,
    pub teardown_timeout: Duration,
}

impl Default for TestSettings {
    fn default() -> Self {
        Self {
            mode: None,
            backend: DatabaseBackend::default(),
            database_port: PortSelection::default(),
            app_port: PortSelection::default(),
            provision_timeout: DEFAULT_PROVISION_TIMEOUT,
            isolation_timeout: DEFAULT_ISOLATION_TIMEOUT,
            teardown_timeout: DEFAULT_TEARDOWN_TIMEOUT,
        }
    }
}

impl TestSettings {
    /// Unmarked settings with defaults; call [`TestSettings::mode`] before provisioning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings explicitly marked as a test process.
    pub fn for_tests() -> Self {
        Self::new().mode(ExecutionMode::Test)
    }

    pub fn mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn backend(mut self, backend: DatabaseBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn database_port(mut self, port: PortSelection) -> Self {
        self.database_port = port;
        self
    }

    pub fn app_port(mut self, port: PortSelection) -> Self {
        self.app_port = port;
        self
    }

    pub fn provision_timeout(mut self, timeout: Duration) -> Self {
        self.provision_timeout = timeout;
        self
    }

    pub fn isolation_timeout(mut self, timeout: Duration) -> Self {
        self.isolation_timeout = timeout;
        self
    }

    pub fn teardown_timeout(mut self, timeout: Duration) -> Self {
        self.teardown_timeout = timeout;
        self
    }

    /// Read settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    ///
    /// A missing `SMILER_ENV` is not an error here: it leaves the process unmarked, and
    /// provisioning refuses to run.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut settings = Self::new();

        if let Some(mode) = present(ENV_EXECUTION_MODE) {
            settings.mode = Some(mode.parse()?);
        }
        if let Some(backend) = present(ENV_TEST_DATABASE) {
            settings.backend = backend.parse()?;
        }
        if let Some(port) = present(ENV_TEST_DATABASE_PORT) {
            settings.database_port = PortSelection::Fixed(parse_port(ENV_TEST_DATABASE_PORT, &port)?);
        }
        if let Some(port) = present(ENV_TEST_APP_PORT) {
            settings.app_port = PortSelection::Fixed(parse_port(ENV_TEST_APP_PORT, &port)?);
        }
        if let Some(secs) = present(ENV_TEST_TIMEOUT_SECS) {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidEnvValue {
                    var: ENV_TEST_TIMEOUT_SECS.to_string(),
                    reason: e.to_string(),
                })?;
            let timeout = Duration::from_secs(secs);
            settings.provision_timeout = timeout;
            settings.isolation_timeout = timeout;
            settings.teardown_timeout = timeout;
        }

        Ok(settings)
    }
}

fn parse_port(var: &str, value: &str) -> Result<u16, ConfigError> {
    match value.trim().parse::<u16>() {
        Ok(0) => Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: "port 0 is not a fixed port; leave the variable unset instead".to_string(),
        }),
        Ok(port) => Ok(port),
        Err(e) => Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings_from(vars: &[(&'static str, &'static str)]) -> Result<TestSettings, ConfigError> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        TestSettings::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn empty_environment_is_unmarked_sqlite_with_auto_ports() {
        let settings = settings_from(&[]).unwrap();

        assert_eq!(settings.mode, None);
        assert_eq!(settings.backend, DatabaseBackend::Sqlite);
        assert_eq!(settings.database_port, PortSelection::Auto);
        assert_eq!(settings.app_port, PortSelection::Auto);
        assert_eq!(settings.provision_timeout, DEFAULT_PROVISION_TIMEOUT);
    }

    #[test]
    fn reads_every_variable() {
        let settings = settings_from(&[
            (ENV_EXECUTION_MODE, "test"),
            (ENV_TEST_DATABASE, "Postgres"),
            (ENV_TEST_DATABASE_PORT, "54329"),
            (ENV_TEST_APP_PORT, "18080"),
            (ENV_TEST_TIMEOUT_SECS, "5"),
        ])
        .unwrap();

        assert_eq!(settings.mode, Some(ExecutionMode::Test));
        assert_eq!(settings.backend, DatabaseBackend::Postgres);
        assert_eq!(settings.database_port, PortSelection::Fixed(54329));
        assert_eq!(settings.app_port, PortSelection::Fixed(18080));
        assert_eq!(settings.isolation_timeout, Duration::from_secs(5));
        assert_eq!(settings.teardown_timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(settings_from(&[(ENV_EXECUTION_MODE, "qa")]).is_err());
        assert!(settings_from(&[(ENV_TEST_DATABASE, "mongodb")]).is_err());
        assert!(settings_from(&[(ENV_TEST_DATABASE_PORT, "70000")]).is_err());
        assert!(settings_from(&[(ENV_TEST_APP_PORT, "0")]).is_err());
        assert!(settings_from(&[(ENV_TEST_TIMEOUT_SECS, "soon")]).is_err());
    }

    #[test]
    fn builder_overrides_defaults() {
        let settings = TestSettings::for_tests()
            .backend(DatabaseBackend::Postgres)
            .database_port(PortSelection::Fixed(6000))
            .isolation_timeout(Duration::from_millis(250));

        assert_eq!(settings.mode, Some(ExecutionMode::Test));
        assert_eq!(settings.database_port, PortSelection::Fixed(6000));
        assert_eq!(settings.isolation_timeout, Duration::from_millis(250));
        assert_eq!(settings.teardown_timeout, DEFAULT_TEARDOWN_TIMEOUT);
    }

    #[test]
    fn auto_port_reserves_a_real_port() {
        let port = PortSelection::Auto.reserve().unwrap();

        assert_ne!(port, 0);
        assert_eq!(PortSelection::Fixed(4321).reserve().unwrap(), 4321);
        assert_eq!(PortSelection::Auto.loopback_addr().port(), 0);
    }
}
