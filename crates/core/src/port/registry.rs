// Resource Registry Port
//
// Resolves a declared resource name to the transaction manager that owns it.
// Built once at startup and shared read-only afterwards.

use crate::domain::ResourceName;
use crate::error::{AppError, Result};
use crate::port::TransactionManager;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Registry lookup interface
pub trait ResourceRegistry: Send + Sync {
    /// Resolve a resource name to its transaction manager
    ///
    /// # Errors
    /// - AppError::Resolution if no manager is registered under `name`
    fn resolve(&self, name: &ResourceName) -> Result<Arc<dyn TransactionManager>>;
}

/// HashMap-backed registry (production and tests)
#[derive(Default)]
pub struct InMemoryResourceRegistry {
    managers: HashMap<ResourceName, Arc<dyn TransactionManager>>,
}

impl InMemoryResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `manager` under `name`; names are unique
    pub fn register(
        &mut self,
        name: ResourceName,
        manager: Arc<dyn TransactionManager>,
    ) -> Result<()> {
        if self.managers.contains_key(&name) {
            return Err(AppError::Conflict(format!(
                "resource '{}' is already registered",
                name
            )));
        }
        self.managers.insert(name, manager);
        Ok(())
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<ResourceName> {
        let mut names: Vec<ResourceName> = self.managers.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }
}

impl ResourceRegistry for InMemoryResourceRegistry {
    fn resolve(&self, name: &ResourceName) -> Result<Arc<dyn TransactionManager>> {
        self.managers
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::Resolution(name.to_string()))
    }
}

impl fmt::Debug for InMemoryResourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryResourceRegistry")
            .field("resources", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::Transaction;
    use async_trait::async_trait;

    struct NeverBegins;

    #[async_trait]
    impl TransactionManager for NeverBegins {
        async fn begin(&self) -> Result<Box<dyn Transaction>> {
            Err(AppError::Begin("unused".to_string()))
        }
    }

    fn name(s: &str) -> ResourceName {
        ResourceName::new(s).unwrap()
    }

    #[test]
    fn test_resolve_registered_and_unknown() {
        let mut registry = InMemoryResourceRegistry::new();
        registry
            .register(name("orders-db"), Arc::new(NeverBegins))
            .unwrap();

        assert!(registry.resolve(&name("orders-db")).is_ok());

        let err = registry.resolve(&name("billing-db")).err().unwrap();
        assert!(matches!(err, AppError::Resolution(ref n) if n == "billing-db"));
    }

    #[test]
    fn test_register_duplicate_conflicts() {
        let mut registry = InMemoryResourceRegistry::new();
        registry
            .register(name("orders-db"), Arc::new(NeverBegins))
            .unwrap();

        let err = registry
            .register(name("orders-db"), Arc::new(NeverBegins))
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_sorted() {
        let mut registry = InMemoryResourceRegistry::new();
        for n in ["orders-db", "audit-db", "inventory-db"] {
            registry.register(name(n), Arc::new(NeverBegins)).unwrap();
        }

        let names: Vec<String> = registry.names().into_iter().map(String::from).collect();
        assert_eq!(names, vec!["audit-db", "inventory-db", "orders-db"]);
    }
}
