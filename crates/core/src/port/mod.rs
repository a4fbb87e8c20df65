// Port Layer - Interfaces for external dependencies

pub mod registry;
pub mod transaction;

// Re-exports
pub use registry::{InMemoryResourceRegistry, ResourceRegistry};
pub use transaction::{Transaction, TransactionManager};
