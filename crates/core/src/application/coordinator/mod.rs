// Multi-Resource Transaction Coordinator
//
// Opens one transaction per declared resource, runs the unit of work, then
// commits everything (success) or rolls everything back (failure), always in
// reverse begin order. Sequential and best-effort: no two-phase commit.

pub mod config;
pub mod session;


pub use config::{CommitFailurePolicy, CoordinatorConfig};
pub use session::CoordinationSession;

use crate::domain::{MultiTransactional, ResourceName};
use crate::error::{AppError, Result};
use crate::port::ResourceRegistry;
use futures::future::BoxFuture;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of a coordinated call that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinationOutcome<T> {
    /// The unit of work ran and every transaction committed
    Committed(T),
    /// No resources were declared; nothing ran
    Skipped,
}

impl<T> CoordinationOutcome<T> {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    /// Value returned by the unit of work, if it ran
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Committed(value) => Some(value),
            Self::Skipped => None,
        }
    }
}

/// Coordinator over a shared resource registry
///
/// Each call owns its own [`CoordinationSession`]; the coordinator itself holds
/// no per-call state and can be shared freely behind an `Arc`.
pub struct MultiTransactionCoordinator {
    registry: Arc<dyn ResourceRegistry>,
    config: CoordinatorConfig,
}

impl MultiTransactionCoordinator {
    pub fn new(registry: Arc<dyn ResourceRegistry>) -> Self {
        Self {
            registry,
            config: CoordinatorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CoordinatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Run `work` inside one transaction per resource declared in `decl`
    ///
    /// Returns `Skipped` without calling `work` when `decl` has no resources.
    /// Otherwise begins each transaction in declaration order, awaits `work`
    /// and commits in reverse order. On any failure the opened transactions are
    /// rolled back in reverse order and the originating error is returned
    /// unchanged: coordination errors as `E::from(AppError)`, work errors as is.
    ///
    /// # Example
    /// ```text
    /// let outcome = coordinator
    ///     .coordinate(&decl, || async { place_order(&order).await })
    ///     .await?;
    /// ```
    pub async fn coordinate<T, E, F, Fut>(
        &self,
        decl: &MultiTransactional,
        work: F,
    ) -> std::result::Result<CoordinationOutcome<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: From<AppError> + Display,
    {
        let Some(session) = self.open(decl).await? else {
            return Ok(CoordinationOutcome::Skipped);
        };

        let result = work().await;
        self.settle(decl, session, result).await
    }

    /// Like [`coordinate`](Self::coordinate), but `work` receives the session
    /// so it can issue statements on the open transactions
    ///
    /// # Example
    /// ```text
    /// coordinator
    ///     .coordinate_scoped(&decl, |session| {
    ///         Box::pin(async move {
    ///             let orders = session.transaction_mut::<SqliteTransaction>("orders-db")?;
    ///             sqlx::query("INSERT ...").execute(orders.connection()).await?;
    ///             Ok(())
    ///         })
    ///     })
    ///     .await?;
    /// ```
    pub async fn coordinate_scoped<T, E, F>(
        &self,
        decl: &MultiTransactional,
        work: F,
    ) -> std::result::Result<CoordinationOutcome<T>, E>
    where
        F: for<'s> FnOnce(&'s mut CoordinationSession) -> BoxFuture<'s, std::result::Result<T, E>>,
        E: From<AppError> + Display,
    {
        let Some(mut session) = self.open(decl).await? else {
            return Ok(CoordinationOutcome::Skipped);
        };

        let result = work(&mut session).await;
        self.settle(decl, session, result).await
    }

    /// Begin one transaction per declared resource
    ///
    /// `Ok(None)` means nothing was declared. On a resolution or begin failure
    /// the transactions opened so far are rolled back before returning.
    async fn open(&self, decl: &MultiTransactional) -> Result<Option<CoordinationSession>> {
        if decl.is_empty() {
            debug!(
                target_type = decl.target(),
                operation = decl.operation(),
                "No resources declared, skipping unit of work"
            );
            return Ok(None);
        }

        debug!(resources = ?decl.resources(), "Opening transactions");

        let mut session = CoordinationSession::with_capacity(decl.resources().len());
        for resource in decl.resources() {
            if let Err(e) = self.begin(resource, &mut session).await {
                session.rollback_all().await;
                report_failure(decl, &e);
                return Err(e);
            }
        }

        Ok(Some(session))
    }

    async fn begin(&self, resource: &ResourceName, session: &mut CoordinationSession) -> Result<()> {
        let manager = self.registry.resolve(resource)?;
        let transaction = manager.begin().await?;
        debug!(resource = %resource, "Transaction begun");

        session.push(resource.clone(), transaction);
        Ok(())
    }

    /// Commit on success, roll back on failure; the session is empty afterwards
    async fn settle<T, E>(
        &self,
        decl: &MultiTransactional,
        mut session: CoordinationSession,
        result: std::result::Result<T, E>,
    ) -> std::result::Result<CoordinationOutcome<T>, E>
    where
        E: From<AppError> + Display,
    {
        match result {
            Ok(value) => match session.commit_all(self.config.commit_failure).await {
                Ok(()) => Ok(CoordinationOutcome::Committed(value)),
                Err(e) => {
                    report_failure(decl, &e);
                    Err(E::from(e))
                }
            },
            Err(e) => {
                session.rollback_all().await;
                report_failure(decl, &e);
                Err(e)
            }
        }
    }
}

/// The single diagnostic record emitted per failed call
fn report_failure(decl: &MultiTransactional, error: &dyn Display) {
    warn!(
        target_type = decl.target(),
        operation = decl.operation(),
        error = %error,
        "Coordinated unit of work failed: {}-{}",
        decl.target(),
        decl.operation()
    );
}
