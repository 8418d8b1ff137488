//! Global action registry with radix tree index
//!
//! Provides [`ActionRegistry`], the accumulator every feature module
//! registers its top-level namespace with during initialization.

use crate::error::RegistryError;
use flux_namespace::{
    Action, ActionPath, ActionType, AsyncPhase, CompiledNamespace, Fingerprint, Namespace,
    NamespaceError, NamingConvention,
};
use indexmap::IndexMap;
use radix_trie::{Trie, TrieCommon};

/// Registry of every compiled constant in the application
///
/// Constants are kept in a radix trie keyed by constant string, which gives
/// exact lookup for collision checks and prefix iteration for inspection.
/// The registry only grows; there is no removal.
#[derive(Debug)]
pub struct ActionRegistry {
    convention: NamingConvention,

    /// Radix trie mapping constant -> registration
    constants: Trie<String, RegisteredConstant>,

    /// Registered top-level namespaces in registration order
    namespaces: IndexMap<String, NamespaceRecord>,

    sealed: bool,
}

/// A constant as recorded by the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredConstant {
    /// The constant
    pub action_type: ActionType,

    /// Owning top-level namespace
    pub namespace: String,

    /// Declared path
    pub path: ActionPath,

    /// Async phase, `None` for sync actions
    pub phase: Option<AsyncPhase>,
}

/// A registered top-level namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceRecord {
    /// Top-level namespace name
    pub name: String,

    /// Fingerprint of its constant table
    pub fingerprint: Fingerprint,

    /// Its constants in compilation order
    pub constants: Vec<ActionType>,
}

impl ActionRegistry {
    /// Create empty registry with the default naming convention
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_convention(NamingConvention::default())
    }

    /// Create empty registry compiling under `convention`
    #[must_use]
    pub fn with_convention(convention: NamingConvention) -> Self {
        Self {
            convention,
            constants: Trie::new(),
            namespaces: IndexMap::new(),
            sealed: false,
        }
    }

    /// Naming convention namespaces are compiled with
    #[inline]
    #[must_use]
    pub fn convention(&self) -> &NamingConvention {
        &self.convention
    }

    /// Compile a top-level namespace and merge its constants
    ///
    /// Registering the same name again with the same constants, declared at
    /// the same paths, is a no-op.
    ///
    /// # Errors
    /// - [`RegistryError::Sealed`] after [`ActionRegistry::seal`]
    /// - [`RegistryError::Namespace`] if the namespace does not compile
    /// - [`RegistryError::ConstantCollision`] if a constant is already owned
    /// - [`RegistryError::DuplicateNamespace`] if the name is taken by other constants
    pub fn register(&mut self, namespace: &Namespace) -> Result<CompiledNamespace, RegistryError> {
        self.ensure_open(namespace.name())?;
        let compiled = namespace.compile_with(&self.convention)?;
        self.merge(&compiled)?;
        Ok(compiled)
    }

    /// Merge a namespace compiled elsewhere
    ///
    /// # Errors
    /// Same as [`ActionRegistry::register`], plus
    /// [`RegistryError::ConventionMismatch`] if `compiled` was built under a
    /// different naming convention.
    pub fn register_compiled(&mut self, compiled: &CompiledNamespace) -> Result<(), RegistryError> {
        self.ensure_open(compiled.name())?;

        for (constant, info) in compiled.constants() {
            let base = self
                .convention
                .constant_for(&info.path)
                .map_err(NamespaceError::from)?;
            let expected = match info.phase {
                Some(phase) => self.convention.phase_constant(&base, phase),
                None => base,
            };
            if &expected != constant {
                return Err(RegistryError::ConventionMismatch {
                    namespace: compiled.name().to_string(),
                    constant: constant.to_string(),
                });
            }
        }

        self.merge(compiled)
    }

    fn ensure_open(&self, namespace: &str) -> Result<(), RegistryError> {
        if self.sealed {
            tracing::warn!("Rejected namespace {} after registry was sealed", namespace);
            return Err(RegistryError::Sealed {
                namespace: namespace.to_string(),
            });
        }
        Ok(())
    }

    fn merge(&mut self, compiled: &CompiledNamespace) -> Result<(), RegistryError> {
        let name = compiled.name();

        if let Some(record) = self.namespaces.get(name) {
            if record.fingerprint == compiled.fingerprint() {
                tracing::debug!("Namespace {} already registered, skipping", name);
                return Ok(());
            }
            tracing::warn!("Namespace {} registered twice with different actions", name);
            return Err(RegistryError::DuplicateNamespace {
                name: name.to_string(),
            });
        }

        // Check every constant before inserting any
        for (constant, info) in compiled.constants() {
            if let Some(existing) = self.constants.get(constant.as_str()) {
                tracing::warn!(
                    "Constant {} from {} collides with namespace {}",
                    constant,
                    name,
                    existing.namespace
                );
                return Err(RegistryError::ConstantCollision {
                    constant: constant.to_string(),
                    existing_namespace: existing.namespace.clone(),
                    existing_path: existing.path.to_string(),
                    incoming_namespace: name.to_string(),
                    incoming_path: info.path.to_string(),
                });
            }
        }

        for (constant, info) in compiled.constants() {
            self.constants.insert(
                constant.to_string(),
                RegisteredConstant {
                    action_type: constant.clone(),
                    namespace: name.to_string(),
                    path: info.path.clone(),
                    phase: info.phase,
                },
            );
        }

        self.namespaces.insert(
            name.to_string(),
            NamespaceRecord {
                name: name.to_string(),
                fingerprint: compiled.fingerprint(),
                constants: compiled.constants().action_types().cloned().collect(),
            },
        );

        tracing::info!(
            "Registered namespace {} ({} constants)",
            name,
            compiled.constants().len()
        );
        Ok(())
    }

    /// End the initialization phase; later registrations fail
    #[inline]
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Check if the registry is sealed
    #[inline]
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Check if a constant is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, constant: &str) -> bool {
        self.constants.get(constant).is_some()
    }

    /// Lookup a registered constant
    #[inline]
    #[must_use]
    pub fn get(&self, constant: &str) -> Option<&RegisteredConstant> {
        self.constants.get(constant)
    }

    /// Check a dispatched action against the registry
    ///
    /// # Errors
    /// Returns [`RegistryError::UnknownAction`] if its type is not registered
    pub fn validate_action(&self, action: &Action) -> Result<&RegisteredConstant, RegistryError> {
        self.get(action.action_type().as_str())
            .ok_or_else(|| RegistryError::UnknownAction {
                action_type: action.action_type().to_string(),
            })
    }

    /// All constants starting with `prefix`, in key order
    #[must_use]
    pub fn constants_with_prefix(&self, prefix: &str) -> Vec<&RegisteredConstant> {
        self.constants
            .get_raw_descendant(prefix)
            .map(|subtrie| {
                subtrie
                    .values()
                    .filter(|c| c.action_type.as_str().starts_with(prefix))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Constants owned by a top-level namespace, in compilation order
    #[must_use]
    pub fn constants_of(&self, namespace: &str) -> Vec<&RegisteredConstant> {
        self.namespaces
            .get(namespace)
            .map(|record| {
                record
                    .constants
                    .iter()
                    .filter_map(|c| self.constants.get(c.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Lookup a registered namespace
    #[inline]
    #[must_use]
    pub fn namespace(&self, name: &str) -> Option<&NamespaceRecord> {
        self.namespaces.get(name)
    }

    /// Registered namespaces in registration order
    pub fn namespaces(&self) -> impl Iterator<Item = &NamespaceRecord> {
        self.namespaces.values()
    }

    /// Total constant count
    #[must_use]
    pub fn len(&self) -> usize {
        self.constants.len()
    }

    /// Check if nothing is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
