// SQLite Transaction Manager Implementation

use crate::error::describe_sqlx_error;
use async_trait::async_trait;
use multitx_core::error::{AppError, Result};
use multitx_core::port::{Transaction, TransactionManager};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction as SqlxTransaction};
use std::any::Any;

/// Begins transactions on one SQLite database
#[derive(Debug, Clone)]
pub struct SqliteTransactionManager {
    pool: SqlitePool,
}

impl SqliteTransactionManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TransactionManager for SqliteTransactionManager {
    async fn begin(&self) -> Result<Box<dyn Transaction>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Begin(describe_sqlx_error(&e)))?;
        Ok(Box::new(SqliteTransaction::new(tx)))
    }
}

/// An open SQLite transaction
///
/// Dropped without commit/rollback, sqlx rolls it back when the connection
/// returns to the pool.
pub struct SqliteTransaction {
    tx: SqlxTransaction<'static, Sqlite>,
}

impl SqliteTransaction {
    pub fn new(tx: SqlxTransaction<'static, Sqlite>) -> Self {
        Self { tx }
    }

    /// Connection to run statements on, inside this transaction
    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }
}

#[async_trait]
impl Transaction for SqliteTransaction {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| AppError::Commit(describe_sqlx_error(&e)))?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| AppError::Rollback(describe_sqlx_error(&e)))?;
        Ok(())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
