//! Helpers for in-crate unit tests.

use std::sync::Arc;

use chrono::{Duration, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ActiveValue, Database, DatabaseConnection, DbErr};
use tower_sessions::{MemoryStore, Session};

/// Creates a [`Session`] instance used for session-related tests
pub fn session_test_setup() -> Session {
    let store = Arc::new(MemoryStore::default());
    Session::new(None, store, None)
}

/// Connects to a fresh in-memory SQLite database with all migrations applied
pub async fn db_test_setup() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Inserts a user with the given login and rating
pub async fn insert_user(
    db: &DatabaseConnection,
    login: &str,
    rating: i32,
) -> Result<entity::smiler_user::Model, DbErr> {
    entity::smiler_user::ActiveModel {
        login: ActiveValue::Set(login.to_string()),
        email: ActiveValue::Set(format!("{}@smiler.test", login)),
        avatar: ActiveValue::Set(String::new()),
        salt: ActiveValue::Set("salt".to_string()),
        hash: ActiveValue::Set("hash".to_string()),
        rating: ActiveValue::Set(rating),
        display_name: ActiveValue::Set(login.to_string()),
        about: ActiveValue::Set(String::new()),
        notify_email: ActiveValue::Set(true),
        notify_replies: ActiveValue::Set(true),
        created_at: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Inserts a rate written by `author_id`, created `age` ago
pub async fn insert_rate(
    db: &DatabaseConnection,
    author_id: i32,
    age: Duration,
) -> Result<entity::smiler_rate::Model, DbErr> {
    entity::smiler_rate::ActiveModel {
        author_id: ActiveValue::Set(author_id),
        title: ActiveValue::Set("title".to_string()),
        text: ActiveValue::Set("text".to_string()),
        rating: ActiveValue::Set(0),
        views: ActiveValue::Set(0),
        comments: ActiveValue::Set(0),
        created_at: ActiveValue::Set(Utc::now().naive_utc() - age),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Inserts a comment on `rate_id`, created `age` ago
pub async fn insert_comment(
    db: &DatabaseConnection,
    author_id: i32,
    rate_id: i32,
    age: Duration,
) -> Result<entity::smiler_comment::Model, DbErr> {
    entity::smiler_comment::ActiveModel {
        author_id: ActiveValue::Set(author_id),
        rate_id: ActiveValue::Set(rate_id),
        text: ActiveValue::Set("comment".to_string()),
        rating: ActiveValue::Set(0),
        created_at: ActiveValue::Set(Utc::now().naive_utc() - age),
        ..Default::default()
    }
    .insert(db)
    .await
}
