// SQLite Connection Pool Setup

use crate::error::map_sqlx_error;
use multitx_core::error::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// URL scheme accepted by `create_pool`
const SQLITE_SCHEME: &str = "sqlite:";

/// Create SQLite connection pool with WAL mode and optimizations
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    // sqlx treats anything without the scheme as a file path
    if !database_url.starts_with(SQLITE_SCHEME) {
        return Err(AppError::Config(format!(
            "database url '{}' must start with '{}'",
            database_url, SQLITE_SCHEME
        )));
    }

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| AppError::Config(format!("invalid database url '{}': {}", database_url, e)))?
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(map_sqlx_error)?;

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .map_err(map_sqlx_error)?;

    Ok(pool)
}
