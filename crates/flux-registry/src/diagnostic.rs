//! Diagnostics for registration collisions
//!
//! Turns a collision [`RegistryError`] into a [`CollisionDiagnostic`] with a
//! suggested fix, for boot-time error reports.

use crate::error::RegistryError;
use flux_namespace::{normalize_segment, ActionPath};

/// Kind of collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Two different top-level namespaces produce one constant
    CrossNamespace,

    /// One top-level name registered with two different action sets
    DuplicateNamespace,
}

/// Suggested resolution for a collision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionSuggestion {
    /// Give the incoming top-level namespace another name
    RenameNamespace {
        /// Namespace to rename
        namespace: String,
    },

    /// Rename the incoming action
    RenameAction {
        /// Dotted path of the action
        path: String,
    },

    /// Declare the incoming actions as a child of the existing namespace
    NestUnderExisting {
        /// Namespace that already owns the prefix
        namespace: String,
    },
}

/// Human-readable collision report
#[derive(Debug, Clone)]
pub struct CollisionDiagnostic {
    /// Kind of conflict
    pub kind: ConflictKind,

    /// Human-readable description
    pub description: String,

    /// Suggested resolution
    pub suggestion: ResolutionSuggestion,
}

impl CollisionDiagnostic {
    /// Build a diagnostic from a collision error
    ///
    /// Returns `None` for errors that are not collisions.
    #[must_use]
    pub fn from_error(error: &RegistryError) -> Option<Self> {
        match error {
            RegistryError::ConstantCollision {
                constant,
                existing_namespace,
                existing_path,
                incoming_namespace,
                incoming_path,
            } => Some(Self {
                kind: ConflictKind::CrossNamespace,
                description: format!(
                    "{constant} is produced by '{existing_path}' and '{incoming_path}'"
                ),
                suggestion: Self::suggest(
                    existing_namespace,
                    existing_path,
                    incoming_namespace,
                    incoming_path,
                ),
            }),
            RegistryError::DuplicateNamespace { name } => Some(Self {
                kind: ConflictKind::DuplicateNamespace,
                description: format!("two modules register a namespace named {name}"),
                suggestion: ResolutionSuggestion::RenameNamespace {
                    namespace: name.clone(),
                },
            }),
            _ => None,
        }
    }

    /// Pick a fix for a cross-namespace collision
    ///
    /// - incoming root extends the existing root's words (`EtsyShops` vs
    ///   `Etsy`) → nest under the existing namespace
    /// - both declarations end in the same action name → rename the namespace
    /// - otherwise → rename the incoming action
    #[must_use]
    pub fn suggest(
        existing_namespace: &str,
        existing_path: &str,
        incoming_namespace: &str,
        incoming_path: &str,
    ) -> ResolutionSuggestion {
        if let (Ok(existing), Ok(incoming)) = (
            normalize_segment(existing_namespace),
            normalize_segment(incoming_namespace),
        ) {
            if incoming.starts_with(&format!("{existing}_")) {
                return ResolutionSuggestion::NestUnderExisting {
                    namespace: existing_namespace.to_string(),
                };
            }
        }

        let last = |path: &str| {
            path.parse::<ActionPath>()
                .ok()
                .and_then(|p| p.last().map(str::to_string))
        };
        if last(existing_path).is_some() && last(existing_path) == last(incoming_path) {
            return ResolutionSuggestion::RenameNamespace {
                namespace: incoming_namespace.to_string(),
            };
        }

        ResolutionSuggestion::RenameAction {
            path: incoming_path.to_string(),
        }
    }
}
