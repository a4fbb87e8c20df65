// Transaction ports for coordinated units of work

use crate::error::Result;
use async_trait::async_trait;
use std::any::Any;

/// One open transaction on one resource
///
/// `commit` and `rollback` consume the handle, so each transaction is
/// finalized at most once.
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;

    /// Concrete access for units of work that issue statements
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Begins transactions on a single resource
#[async_trait]
pub trait TransactionManager: Send + Sync {
    /// Begin a new transaction
    async fn begin(&self) -> Result<Box<dyn Transaction>>;
}
