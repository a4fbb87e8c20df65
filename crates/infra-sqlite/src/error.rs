// sqlx::Error -> AppError mapping
//
// Lives here because of the orphan rule (cannot implement From<sqlx::Error>
// for AppError outside core).

use multitx_core::error::AppError;

/// Describe an sqlx error with SQLite result-code aware wording
pub(crate) fn describe_sqlx_error(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db_err) => {
            // SQLite error codes: https://www.sqlite.org/rescode.html
            match db_err.code().as_deref() {
                Some("5") => format!("Database locked (SQLITE_BUSY): {}", db_err.message()),
                Some("13") => format!("Database full: {}", db_err.message()),
                Some("2067") | Some("1555") => format!(
                    "Unique constraint violation: {}",
                    db_err.message()
                ),
                Some("787") | Some("3850") => format!(
                    "Foreign key constraint violation: {}",
                    db_err.message()
                ),
                Some(code) => format!("Database error [{}]: {}", code, db_err.message()),
                None => format!("Database error: {}", db_err.message()),
            }
        }
        sqlx::Error::PoolClosed => "Connection pool closed".to_string(),
        sqlx::Error::PoolTimedOut => "Timed out acquiring a connection".to_string(),
        _ => err.to_string(),
    }
}

pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    AppError::Database(describe_sqlx_error(&err))
}
