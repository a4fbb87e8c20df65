// Unit-of-Work Declaration
//
// Call-site configuration attached to a protected operation: which resources
// to open (in order) and how to name the operation in diagnostics.

use super::error::{DomainError, Result};
use super::resource::ResourceName;

/// Declares the ordered resources a unit of work runs under
///
/// Order is significant: transactions are begun in this order and finalized in
/// reverse. A declaration without resources makes coordination a no-op.
///
/// # Example
/// ```
/// use multitx_core::MultiTransactional;
///
/// let decl = MultiTransactional::new("OrderService", "place_order")
///     .unwrap()
///     .with_resources(["orders-db", "inventory-db"])
///     .unwrap();
/// assert_eq!(decl.resources().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiTransactional {
    target: String,
    operation: String,
    resources: Vec<ResourceName>,
}

impl MultiTransactional {
    /// Create a declaration for `target::operation` with no resources yet
    pub fn new(target: impl Into<String>, operation: impl Into<String>) -> Result<Self> {
        let target = target.into();
        let operation = operation.into();

        if target.trim().is_empty() || operation.trim().is_empty() {
            return Err(DomainError::InvalidOperation(format!(
                "{:?}::{:?}",
                target, operation
            )));
        }

        Ok(Self {
            target,
            operation,
            resources: Vec::new(),
        })
    }

    /// Append one resource; a name may appear only once per declaration
    pub fn with_resource<S>(self, name: S) -> Result<Self>
    where
        S: TryInto<ResourceName, Error = DomainError>,
    {
        self.with_resource_name(name.try_into()?)
    }

    /// Append an already validated resource name
    pub fn with_resource_name(mut self, name: ResourceName) -> Result<Self> {
        if self.resources.contains(&name) {
            return Err(DomainError::DuplicateResource(name.to_string()));
        }
        self.resources.push(name);
        Ok(self)
    }

    /// Append resources in iteration order
    pub fn with_resources<I, S>(self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: TryInto<ResourceName, Error = DomainError>,
    {
        names
            .into_iter()
            .try_fold(self, |decl, name| decl.with_resource(name))
    }

    /// Append already validated resource names in iteration order
    pub fn with_resource_names<I>(self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = ResourceName>,
    {
        names
            .into_iter()
            .try_fold(self, |decl, name| decl.with_resource_name(name))
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Resources in begin order
    pub fn resources(&self) -> &[ResourceName] {
        &self.resources
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
