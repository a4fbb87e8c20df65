// Domain Layer - Resource names and unit-of-work declarations

pub mod declaration;
pub mod error;
pub mod resource;

// Re-exports
pub use declaration::MultiTransactional;
pub use error::DomainError;
pub use resource::ResourceName;
