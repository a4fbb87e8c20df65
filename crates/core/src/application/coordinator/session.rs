// Coordination Session - LIFO record of transactions opened for one call

use super::config::CommitFailurePolicy;
use crate::domain::ResourceName;
use crate::error::{AppError, Result};
use crate::port::Transaction;
use tracing::{debug, error, warn};

/// A begun transaction paired with the resource it belongs to
struct OpenedTransaction {
    resource: ResourceName,
    transaction: Box<dyn Transaction>,
}

/// Transactions opened during one coordinated call, in begin order
///
/// Units of work passed to `coordinate_scoped` get `&mut` access to look up
/// their transactions by resource name. Finalization (commit/rollback) is
/// reserved to the coordinator and always pops from the top.
pub struct CoordinationSession {
    opened: Vec<OpenedTransaction>,
}

impl CoordinationSession {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            opened: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, resource: ResourceName, transaction: Box<dyn Transaction>) {
        self.opened.push(OpenedTransaction {
            resource,
            transaction,
        });
    }

    /// Resource names in begin order
    pub fn resources(&self) -> impl Iterator<Item = &ResourceName> {
        self.opened.iter().map(|o| &o.resource)
    }

    pub fn len(&self) -> usize {
        self.opened.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opened.is_empty()
    }

    /// Borrow the open transaction for `resource` as its concrete adapter type
    ///
    /// # Errors
    /// - AppError::NotFound if `resource` was not opened in this session
    /// - AppError::InvalidState if the transaction is not a `T`
    pub fn transaction_mut<T>(&mut self, resource: &str) -> Result<&mut T>
    where
        T: Transaction + 'static,
    {
        let opened = self
            .opened
            .iter_mut()
            .find(|o| o.resource.as_str() == resource)
            .ok_or_else(|| {
                AppError::NotFound(format!("no open transaction for resource '{}'", resource))
            })?;

        opened
            .transaction
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| {
                AppError::InvalidState(format!(
                    "transaction for resource '{}' is not a {}",
                    resource,
                    std::any::type_name::<T>()
                ))
            })
    }

    /// Commit every entry, last-opened first
    ///
    /// Stops at the first failing commit. Entries above it are already
    /// committed; entries below it are rolled back or released per `policy`.
    pub(crate) async fn commit_all(&mut self, policy: CommitFailurePolicy) -> Result<()> {
        while let Some(OpenedTransaction {
            resource,
            transaction,
        }) = self.opened.pop()
        {
            if let Err(e) = transaction.commit().await {
                error!(resource = %resource, error = %e, "Commit failed");

                match policy {
                    CommitFailurePolicy::RollbackRemaining => self.rollback_all().await,
                    CommitFailurePolicy::Abandon => {
                        warn!(
                            abandoned = self.opened.len(),
                            "Abandoning uncommitted transactions"
                        );
                        self.opened.clear();
                    }
                }
                return Err(e);
            }
            debug!(resource = %resource, "Transaction committed");
        }

        debug!("All transactions committed");
        Ok(())
    }

    /// Roll back every entry, last-opened first
    ///
    /// Best-effort: a failing rollback is logged and the remaining entries are
    /// still rolled back.
    pub(crate) async fn rollback_all(&mut self) {
        while let Some(OpenedTransaction {
            resource,
            transaction,
        }) = self.opened.pop()
        {
            match transaction.rollback().await {
                Ok(()) => debug!(resource = %resource, "Transaction rolled back"),
                Err(e) => error!(
                    resource = %resource,
                    error = %e,
                    "Rollback failed, continuing with remaining transactions"
                ),
            }
        }
    }
}

impl Drop for CoordinationSession {
    fn drop(&mut self) {
        // Only reachable when the coordinating future is dropped mid-flight
        if !self.is_empty() {
            warn!(
                open = self.len(),
                "Coordination session dropped with unfinished transactions"
            );
        }
    }
}
