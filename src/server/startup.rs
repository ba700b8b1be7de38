//! Application startup.
//!
//! [`start_app`] is the single entry point used by both the binary and the integration
//! harness: it connects to the database, applies migrations, binds the HTTP listener and
//! serves the router on a background task until [`AppHandle::shutdown`] is called.

use std::net::SocketAddr;

use sea_orm::DatabaseConnection;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::server::{config::Config, error::Error, model::app::AppState, router};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Configure session management backed by an in-process store
pub fn build_session_layer(config: &Config) -> SessionManagerLayer<MemoryStore> {
    use time::Duration;
    use tower_sessions::{cookie::SameSite, Expiry};

    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)))
}

/// Handle to a running application instance.
///
/// Dropping the handle without calling [`AppHandle::shutdown`] also triggers a graceful
/// shutdown, but nothing waits for it and the database pool is closed only when its last
/// clone is dropped.
pub struct AppHandle {
    local_addr: SocketAddr,
    db: DatabaseConnection,
    shutdown: Option<oneshot::Sender<()>>,
    server: JoinHandle<Result<(), std::io::Error>>,
}

impl AppHandle {
    /// Address the HTTP listener is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Base URL of the running server, e.g. `http://127.0.0.1:41234`
    pub fn url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    /// Database connection used by the application
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Stop accepting connections, wait for in-flight requests and close the database pool.
    pub async fn shutdown(mut self) -> Result<(), Error> {
        if let Some(tx) = self.shutdown.take() {
            // The receiver is gone only if the server task already exited
            let _ = tx.send(());
        }

        match self.server.await {
            Ok(result) => result?,
            Err(e) => return Err(Error::InternalError(format!("server task failed: {}", e))),
        }

        self.db.close().await?;

        tracing::info!(addr = %self.local_addr, "Server stopped");

        Ok(())
    }
}

/// Start the application.
///
/// Returns once the database is migrated and the listener is bound, so the returned handle
/// is immediately ready to accept requests. Binding to port `0` picks a free port; read it
/// back with [`AppHandle::local_addr`].
pub async fn start_app(config: Config) -> Result<AppHandle, Error> {
    let db = connect_to_database(&config).await?;

    let router = router::routes()
        .with_state(AppState { db: db.clone() })
        .layer(build_session_layer(&config));

    let listener = TcpListener::bind(config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let (tx, rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await
    });

    tracing::info!(
        addr = %local_addr,
        environment = %config.environment,
        "Server listening"
    );

    Ok(AppHandle {
        local_addr,
        db,
        shutdown: Some(tx),
        server,
    })
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use crate::server::{
        config::{Config, ExecutionMode},
        error::Error,
        startup::start_app,
    };

    /// Expect the server to bind an OS-assigned port and stop cleanly
    #[tokio::test]
    async fn starts_and_stops_on_free_port() -> Result<(), Error> {
        let config = Config::new(ExecutionMode::Test, "sqlite::memory:")
            .with_bind_addr(SocketAddr::from(([127, 0, 0, 1], 0)));

        let app = start_app(config).await?;

        assert_ne!(app.local_addr().port(), 0);
        assert!(app.url().starts_with("http://127.0.0.1:"));

        app.shutdown().await
    }

    /// Expect an error when the database URL is unusable
    #[tokio::test]
    async fn fails_for_invalid_database_url() {
        let config = Config::new(ExecutionMode::Test, "nosuchdb://nowhere")
            .with_bind_addr(SocketAddr::from(([127, 0, 0, 1], 0)));

        let result = start_app(config).await;

        assert!(matches!(result, Err(Error::DbErr(_))));
    }
}
