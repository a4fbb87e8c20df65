// Registry wiring for configured SQLite resources

use crate::settings::SqliteResourceConfig;
use crate::{create_pool, SqliteTransactionManager};
use multitx_core::error::Result;
use multitx_core::port::InMemoryResourceRegistry;
use std::sync::Arc;
use tracing::info;

/// Open one pool per configured resource and register its manager by name
pub async fn build_registry<'a, I>(resources: I) -> Result<InMemoryResourceRegistry>
where
    I: IntoIterator<Item = &'a SqliteResourceConfig>,
{
    let mut registry = InMemoryResourceRegistry::new();

    for resource in resources {
        info!(
            resource = %resource.name,
            url = %resource.url,
            max_connections = resource.max_connections,
            "Opening resource pool"
        );
        let pool = create_pool(&resource.url, resource.max_connections).await?;
        registry.register(
            resource.name.clone(),
            Arc::new(SqliteTransactionManager::new(pool)),
        )?;
    }

    Ok(registry)
}
