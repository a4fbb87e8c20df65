// Multitx Core - Coordinator, Domain & Ports
// NO infrastructure dependencies (ports-and-adapters layout)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::coordinator::{
    CommitFailurePolicy, CoordinationOutcome, CoordinationSession, CoordinatorConfig,
    MultiTransactionCoordinator,
};
pub use domain::{MultiTransactional, ResourceName};
pub use error::{AppError, Result};
