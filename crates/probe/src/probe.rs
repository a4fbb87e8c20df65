// Probe: one coordinated no-op across the selected resources

use multitx_core::error::{AppError, Result};
use multitx_core::{CoordinationOutcome, MultiTransactionCoordinator, MultiTransactional, ResourceName};
use multitx_infra_sqlite::SqliteTransaction;
use tracing::debug;

/// Begin a transaction on every resource, run `SELECT 1` in each, commit all
///
/// Returns the number of resources that took part.
pub async fn run_probe(
    coordinator: &MultiTransactionCoordinator,
    resources: &[ResourceName],
) -> Result<CoordinationOutcome<usize>> {
    let decl = MultiTransactional::new("multitx-probe", "probe")?
        .with_resource_names(resources.iter().cloned())?;

    coordinator
        .coordinate_scoped(&decl, |session| {
            Box::pin(async move {
                let names: Vec<ResourceName> = session.resources().cloned().collect();
                for name in &names {
                    let tx = session.transaction_mut::<SqliteTransaction>(name.as_str())?;
                    let one: i64 = sqlx::query_scalar("SELECT 1")
                        .fetch_one(tx.connection())
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?;
                    debug!(resource = %name, result = one, "Probe query ok");
                }
                Ok(names.len())
            })
        })
        .await
}
