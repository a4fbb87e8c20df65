// Application Layer - Coordination use case

pub mod coordinator;

// Re-exports
pub use coordinator::{CoordinationOutcome, MultiTransactionCoordinator};
