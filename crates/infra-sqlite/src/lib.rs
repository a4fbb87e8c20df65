// Multitx Infrastructure - SQLite Adapter
// Implements: TransactionManager over an sqlx pool, settings loading, registry wiring

mod connection;
mod error;
mod registry;
mod settings;
mod transaction;

pub use connection::create_pool;
pub use registry::build_registry;
pub use settings::{Settings, SqliteResourceConfig, DEFAULT_MAX_CONNECTIONS, ENV_PREFIX};
pub use transaction::{SqliteTransaction, SqliteTransactionManager};
