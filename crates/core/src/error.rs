// Central Error Type for the Coordinator

use thiserror::Error;

/// Application-level error type
///
/// Coordination failures (`Resolution`, `Begin`, `Commit`) are returned to the
/// caller unchanged; `Rollback` errors are logged and never surface from
/// `coordinate`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Resource not resolvable: {0}")]
    Resolution(String),

    #[error("Begin failed: {0}")]
    Begin(String),

    #[error("Commit failed: {0}")]
    Commit(String),

    #[error("Rollback failed: {0}")]
    Rollback(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Note: sqlx::Error conversion is handled in infra-sqlite crate
// by converting to AppError::Database / Begin / Commit / Rollback (String)
