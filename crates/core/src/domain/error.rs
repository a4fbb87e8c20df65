// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid resource name: {0:?}")]
    InvalidResourceName(String),

    #[error("Resource declared more than once: {0}")]
    DuplicateResource(String),

    #[error("Invalid operation identity: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
