//! Application state.

use sea_orm::DatabaseConnection;

/// State shared with every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    /// Connection pool of the application database
    pub db: DatabaseConnection,
}

impl From<DatabaseConnection> for AppState {
    fn from(db: DatabaseConnection) -> Self {
        Self { db }
    }
}
