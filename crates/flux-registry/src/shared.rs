//! Shared registry handle
//!
//! Registration happens on one thread during initialization; after
//! [`SharedRegistry::seal`] any number of readers may hold read locks.

use crate::error::RegistryError;
use crate::registry::ActionRegistry;
use flux_namespace::{CompiledNamespace, Namespace};
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

/// Cloneable handle to one [`ActionRegistry`]
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<ActionRegistry>>,
}

impl SharedRegistry {
    /// Wrap a registry
    #[must_use]
    pub fn new(registry: ActionRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Register a namespace under the write lock
    ///
    /// # Errors
    /// See [`ActionRegistry::register`]
    pub fn register(&self, namespace: &Namespace) -> Result<CompiledNamespace, RegistryError> {
        self.inner.write().register(namespace)
    }

    /// Seal the underlying registry
    pub fn seal(&self) {
        self.inner.write().seal();
    }

    /// Check if the underlying registry is sealed
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.inner.read().is_sealed()
    }

    /// Check if a constant is registered
    #[must_use]
    pub fn contains(&self, constant: &str) -> bool {
        self.inner.read().contains(constant)
    }

    /// Read access for lookups
    pub fn read(&self) -> RwLockReadGuard<'_, ActionRegistry> {
        self.inner.read()
    }
}

impl From<ActionRegistry> for SharedRegistry {
    fn from(registry: ActionRegistry) -> Self {
        Self::new(registry)
    }
}
