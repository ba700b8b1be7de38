//! Ephemeral database instances.
//!
//! An instance lives in a private temporary directory and never touches real deployment
//! state. SQLite instances are a single database file; Postgres instances are a private
//! server process started from locally installed binaries (`initdb`, `postgres`,
//! `pg_isready`), listening on loopback only.

use std::{
    path::{Path, PathBuf},
    process::Stdio,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use sea_orm::{ConnectionTrait, Database};
use tempfile::TempDir;
use tokio::process::{Child, Command};

use crate::{
    error::TestError,
    settings::{DatabaseBackend, TestSettings},
};

const READY_POLL_ATTEMPTS: u32 = 50;
const READY_POLL_INTERVAL: Duration = Duration::from_millis(200);
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);
const LOG_TAIL_LINES: usize = 20;

/// A running ephemeral database instance holding one uniquely named logical database.
pub struct EphemeralDatabase {
    uri: String,
    database: String,
    server: Server,
}

enum Server {
    Sqlite {
        dir: TempDir,
    },
    Postgres {
        process: Child,
        port: u16,
        dir: TempDir,
    },
}

impl EphemeralDatabase {
    /// Start an instance of the configured backend and create a fresh logical database.
    pub async fn start(settings: &TestSettings) -> Result<Self, TestError> {
        let database = unique_database_name();

        match settings.backend {
            DatabaseBackend::Sqlite => start_sqlite(database),
            DatabaseBackend::Postgres => start_postgres(settings, database).await,
        }
    }

    /// Connection URI of the logical database
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Name of the logical database
    pub fn database_name(&self) -> &str {
        &self.database
    }

    /// Port the database server listens on; `None` for SQLite
    pub fn port(&self) -> Option<u16> {
        match &self.server {
            Server::Sqlite { .. } => None,
            Server::Postgres { port, .. } => Some(*port),
        }
    }

    /// Directory holding the instance's files
    pub fn data_dir(&self) -> &Path {
        match &self.server {
            Server::Sqlite { dir } => dir.path(),
            Server::Postgres { dir, .. } => dir.path(),
        }
    }

    /// Stop the server process, if any, and remove the instance's files.
    pub async fn stop(self) -> Result<(), TestError> {
        match self.server {
            Server::Sqlite { dir } => {
                dir.close()?;
            }
            Server::Postgres {
                mut process,
                port,
                dir,
            } => {
                shutdown_postgres(&mut process).await?;
                dir.close()?;

                tracing::debug!(port = port, "Stopped ephemeral postgres");
            }
        }

        Ok(())
    }
}

fn start_sqlite(database: String) -> Result<EphemeralDatabase, TestError> {
    let dir = tempfile::Builder::new().prefix("smiler-sqlite-").tempdir()?;
    let path = dir.path().join(format!("{}.db", database));
    let uri = format!("sqlite://{}?mode=rwc", path.display());

    Ok(EphemeralDatabase {
        uri,
        database,
        server: Server::Sqlite { dir },
    })
}

async fn start_postgres(
    settings: &TestSettings,
    database: String,
) -> Result<EphemeralDatabase, TestError> {
    if let Some(reason) = postgres_unavailable() {
        return Err(TestError::Instance(reason));
    }
    let binaries = PostgresBinaries::locate().map_err(TestError::Instance)?;
    let port = settings.database_port.reserve()?;
    let dir = tempfile::Builder::new().prefix("smiler-pg-").tempdir()?;
    let data_dir = dir.path().join("data");
    let log_path = dir.path().join("postgres.log");

    run_checked(
        Command::new(&binaries.initdb)
            .arg("-D")
            .arg(&data_dir)
            .args(["--username=postgres", "--auth=trust"]),
        "initdb",
    )
    .await?;

    // The unix socket goes into the instance directory so no system directory is needed
    let mut process = Command::new(&binaries.postgres)
        .arg("-D")
        .arg(&data_dir)
        .args(["-p", &port.to_string(), "-h", "127.0.0.1", "-k"])
        .arg(dir.path())
        .stdout(Stdio::null())
        .stderr(Stdio::from(std::fs::File::create(&log_path)?))
        .kill_on_drop(true)
        .spawn()?;

    wait_for_ready(&binaries.pg_isready, &mut process, port, &log_path).await?;

    let admin_url = format!("postgres://postgres@127.0.0.1:{}/postgres", port);
    create_database(&admin_url, &database).await?;

    tracing::debug!(port = port, database = %database, "Started ephemeral postgres");

    Ok(EphemeralDatabase {
        uri: format!("postgres://postgres@127.0.0.1:{}/{}", port, database),
        database,
        server: Server::Postgres { process, port, dir },
    })
}

struct PostgresBinaries {
    initdb: PathBuf,
    postgres: PathBuf,
    pg_isready: PathBuf,
}

impl PostgresBinaries {
    fn locate() -> Result<Self, String> {
        Ok(Self {
            initdb: resolve_binary("initdb")?,
            postgres: resolve_binary("postgres")?,
            pg_isready: resolve_binary("pg_isready")?,
        })
    }
}

/// Returns `true` when the Postgres backend can start in this environment.
pub fn postgres_available() -> bool {
    postgres_unavailable().is_none()
}

/// Why the Postgres backend cannot start here, or `None` if it can.
///
/// The binaries must be installed, and the process must not run as root: `initdb` and
/// `postgres` refuse to start under a superuser account.
pub fn postgres_unavailable() -> Option<String> {
    if let Err(reason) = PostgresBinaries::locate() {
        return Some(reason);
    }
    if running_as_root() {
        return Some("postgres cannot be run as root; run the tests as an unprivileged user".to_string());
    }

    None
}

#[cfg(unix)]
fn running_as_root() -> bool {
    nix::unistd::Uid::effective().is_root()
}

#[cfg(not(unix))]
fn running_as_root() -> bool {
    false
}

fn resolve_binary(name: &str) -> Result<PathBuf, String> {
    let mut search_paths: Vec<PathBuf> = std::env::var_os("PATH")
        .map_or_else(Vec::new, |paths| std::env::split_paths(&paths).collect());
    // Debian/Ubuntu keep the server binaries out of PATH
    for version in ["17", "16", "15", "14"] {
        search_paths.push(PathBuf::from(format!("/usr/lib/postgresql/{}/bin", version)));
    }
    search_paths.extend([
        PathBuf::from("/opt/homebrew/bin"),
        PathBuf::from("/usr/local/bin"),
    ]);

    search_paths
        .into_iter()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| format!("{} binary is required for postgres tests", name))
}

/// Run a command to completion; on failure the error carries its exit status and stderr.
async fn run_checked(command: &mut Command, name: &str) -> Result<(), TestError> {
    let output = command.output().await?;
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(TestError::Instance(format!(
        "{} failed ({}): {}",
        name,
        output.status,
        stderr.trim()
    )))
}

async fn wait_for_ready(
    pg_isready: &Path,
    process: &mut Child,
    port: u16,
    log_path: &Path,
) -> Result<(), TestError> {
    for _ in 0..READY_POLL_ATTEMPTS {
        if let Some(status) = process.try_wait()? {
            return Err(TestError::Instance(format!(
                "postgres exited during startup ({}): {}",
                status,
                log_tail(log_path)
            )));
        }

        let status = Command::new(pg_isready)
            .args(["-h", "127.0.0.1", "-p", &port.to_string(), "-U", "postgres"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;
        if matches!(status, Ok(ref s) if s.success()) {
            return Ok(());
        }
        tokio::time::sleep(READY_POLL_INTERVAL).await;
    }

    Err(TestError::Instance(format!(
        "postgres did not become ready in time: {}",
        log_tail(log_path)
    )))
}

/// Last lines of the server log, for error messages
fn log_tail(log_path: &Path) -> String {
    let log = std::fs::read_to_string(log_path).unwrap_or_default();
    let lines: Vec<&str> = log.lines().collect();
    let start = lines.len().saturating_sub(LOG_TAIL_LINES);

    lines[start..].join("\n")
}

/// Ask postgres for a fast shutdown, escalating to SIGKILL if it does not exit in time.
async fn shutdown_postgres(process: &mut Child) -> Result<(), TestError> {
    if request_fast_shutdown(process) {
        if let Ok(status) = tokio::time::timeout(SHUTDOWN_GRACE, process.wait()).await {
            status?;
            return Ok(());
        }
        tracing::warn!("Postgres did not shut down in time, killing it");
    }

    process
        .kill()
        .await
        .map_err(|e| TestError::Instance(format!("failed to stop postgres: {}", e)))
}

/// Send SIGINT, which postgres treats as "fast shutdown". Returns `false` if the signal
/// could not be delivered.
#[cfg(unix)]
fn request_fast_shutdown(process: &Child) -> bool {
    use nix::{
        sys::signal::{self, Signal},
        unistd::Pid,
    };

    let Some(pid) = process.id() else {
        return false;
    };

    match signal::kill(Pid::from_raw(pid as i32), Signal::SIGINT) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(pid = pid, "Failed to signal postgres: {}", e);
            false
        }
    }
}

#[cfg(not(unix))]
fn request_fast_shutdown(_process: &Child) -> bool {
    false
}

async fn create_database(admin_url: &str, database: &str) -> Result<(), TestError> {
    let admin = Database::connect(admin_url).await?;
    admin
        .execute_unprepared(&format!("CREATE DATABASE \"{}\"", database))
        .await?;
    admin.close().await?;

    Ok(())
}

/// Unique logical database name, e.g. `smiler_test_4242_1760700000123456789`
pub fn unique_database_name() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let pid = std::process::id();
    format!("smiler_test_{}_{}", pid, nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_names_are_unique_and_identifier_safe() {
        let first = unique_database_name();
        std::thread::sleep(Duration::from_millis(1));
        let second = unique_database_name();

        assert_ne!(first, second);
        assert!(first
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
    }

    #[tokio::test]
    async fn sqlite_instance_lives_in_private_directory() -> Result<(), TestError> {
        let instance = EphemeralDatabase::start(&TestSettings::for_tests()).await?;
        let dir = instance.data_dir().to_path_buf();

        assert!(dir.exists());
        assert!(instance.uri().starts_with("sqlite://"));
        assert!(instance.uri().contains(instance.database_name()));
        assert_eq!(instance.port(), None);

        instance.stop().await?;

        assert!(!dir.exists());

        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failed_command_reports_its_stderr() {
        let result = run_checked(
            Command::new("sh").args(["-c", "echo 'cannot be run as root' >&2; exit 1"]),
            "initdb",
        )
        .await;

        assert!(matches!(
            result,
            Err(TestError::Instance(ref m)) if m.starts_with("initdb failed") && m.ends_with("cannot be run as root")
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn successful_command_passes() -> Result<(), TestError> {
        run_checked(&mut Command::new("true"), "true").await
    }

    #[tokio::test]
    async fn postgres_start_reports_why_it_is_unavailable() -> Result<(), TestError> {
        let Some(reason) = postgres_unavailable() else {
            return Ok(());
        };

        let settings = TestSettings::for_tests().backend(DatabaseBackend::Postgres);
        let result = EphemeralDatabase::start(&settings).await;

        assert!(matches!(result, Err(TestError::Instance(ref m)) if *m == reason));

        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn root_cannot_use_postgres() {
        if nix::unistd::Uid::effective().is_root() {
            assert!(!postgres_available());
        }
    }

    #[test]
    fn log_tail_keeps_last_lines() -> Result<(), TestError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("postgres.log");
        let log: Vec<String> = (0..30).map(|i| format!("line {}", i)).collect();
        std::fs::write(&path, log.join("\n"))?;

        let tail = log_tail(&path);

        assert!(tail.starts_with("line 10"));
        assert!(tail.ends_with("line 29"));
        assert_eq!(log_tail(&dir.path().join("missing.log")), "");

        Ok(())
    }
}
