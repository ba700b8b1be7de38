//! Application configuration loaded from environment variables.
//!
//! The binary reads its configuration once at startup via [`Config::from_env`]. Library
//! callers such as the integration harness build a [`Config`] value directly and hand it to
//! [`start_app`](crate::server::startup::start_app), so nothing inside the server performs
//! ambient environment lookups after startup.

use std::{fmt, net::SocketAddr, str::FromStr};

use crate::server::error::config::ConfigError;

/// Environment variable holding the execution mode marker.
pub const ENV_EXECUTION_MODE: &str = "SMILER_ENV";
/// Environment variable holding the database connection URL.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
/// Environment variable holding the HTTP listen address.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";

/// Listen address used when `BIND_ADDR` is not set.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Execution mode of the current process.
///
/// Destructive tooling (the test harness wipes every table between cases) must only ever run
/// when the mode is [`ExecutionMode::Test`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Live deployment
    Production,
    /// Local development server
    Development,
    /// Automated test run; the only mode the test harness accepts
    Test,
}

impl ExecutionMode {
    /// Returns `true` for [`ExecutionMode::Test`]
    pub fn is_test(self) -> bool {
        self == Self::Test
    }

    /// Canonical lowercase name, as accepted in `SMILER_ENV`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            other => Err(ConfigError::InvalidEnvValue {
                var: ENV_EXECUTION_MODE.to_string(),
                reason: format!("unknown execution mode {other:?}"),
            }),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Execution mode of the process
    pub environment: ExecutionMode,
    /// Connection URL of the application database
    pub database_url: String,
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,
    /// Whether session cookies are marked `Secure`; enabled only in production.
    pub secure_cookies: bool,
}

impl Config {
    /// Build a configuration for the given mode and database, listening on the default address.
    pub fn new(environment: ExecutionMode, database_url: impl Into<String>) -> Self {
        Self {
            environment,
            database_url: database_url.into(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            secure_cookies: environment == ExecutionMode::Production,
        }
    }

    /// Override the HTTP listen address. Port `0` lets the OS pick a free port.
    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup.
    ///
    /// `SMILER_ENV` and `DATABASE_URL` are required, `BIND_ADDR` defaults to
    /// [`DEFAULT_BIND_ADDR`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
        };

        let environment: ExecutionMode = required(ENV_EXECUTION_MODE)?.parse()?;
        let database_url = required(ENV_DATABASE_URL)?;
        let bind_addr = lookup(ENV_BIND_ADDR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: ENV_BIND_ADDR.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self::new(environment, database_url).with_bind_addr(bind_addr))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup<'a>(vars: &'a HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| vars.get(key).map(|v| v.to_string())
    }

    #[test]
    fn parses_execution_modes_case_insensitively() {
        assert_eq!("Production".parse::<ExecutionMode>().unwrap(), ExecutionMode::Production);
        assert_eq!("prod".parse::<ExecutionMode>().unwrap(), ExecutionMode::Production);
        assert_eq!("DEV".parse::<ExecutionMode>().unwrap(), ExecutionMode::Development);
        assert_eq!(" test ".parse::<ExecutionMode>().unwrap(), ExecutionMode::Test);
    }

    #[test]
    fn rejects_unknown_execution_mode() {
        let result = "staging".parse::<ExecutionMode>();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvValue { ref var, .. }) if var == ENV_EXECUTION_MODE
        ));
    }

    #[test]
    fn reads_full_configuration() {
        let vars = HashMap::from([
            (ENV_EXECUTION_MODE, "production"),
            (ENV_DATABASE_URL, "postgres://localhost/smiler"),
            (ENV_BIND_ADDR, "0.0.0.0:3000"),
        ]);

        let config = Config::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.environment, ExecutionMode::Production);
        assert_eq!(config.database_url, "postgres://localhost/smiler");
        assert_eq!(config.bind_addr.port(), 3000);
        assert!(config.secure_cookies);
    }

    #[test]
    fn defaults_bind_address() {
        let vars = HashMap::from([
            (ENV_EXECUTION_MODE, "development"),
            (ENV_DATABASE_URL, "sqlite::memory:"),
        ]);

        let config = Config::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert!(!config.secure_cookies);
    }

    #[test]
    fn missing_mode_is_an_error() {
        let vars = HashMap::from([(ENV_DATABASE_URL, "sqlite::memory:")]);

        let result = Config::from_lookup(lookup(&vars));

        assert!(matches!(result, Err(ConfigError::MissingEnvVar(ref var)) if var == ENV_EXECUTION_MODE));
    }

    #[test]
    fn blank_database_url_is_missing() {
        let vars = HashMap::from([(ENV_EXECUTION_MODE, "test"), (ENV_DATABASE_URL, "  ")]);

        let result = Config::from_lookup(lookup(&vars));

        assert!(matches!(result, Err(ConfigError::MissingEnvVar(ref var)) if var == ENV_DATABASE_URL));
    }

    #[test]
    fn invalid_bind_address_is_reported() {
        let vars = HashMap::from([
            (ENV_EXECUTION_MODE, "test"),
            (ENV_DATABASE_URL, "sqlite::memory:"),
            (ENV_BIND_ADDR, "not-an-address"),
        ]);

        let result = Config::from_lookup(lookup(&vars));

        assert!(matches!(result, Err(ConfigError::InvalidEnvValue { ref var, .. }) if var == ENV_BIND_ADDR));
    }
}
