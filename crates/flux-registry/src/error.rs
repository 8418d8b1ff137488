//! Error types for the action registry

use flux_namespace::NamespaceError;

/// Registry errors
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Two top-level namespaces compile the same constant
    #[error(
        "constant {constant} from '{incoming_path}' (namespace {incoming_namespace}) \
         collides with '{existing_path}' (namespace {existing_namespace})"
    )]
    ConstantCollision {
        /// The colliding constant
        constant: String,
        /// Namespace that registered it first
        existing_namespace: String,
        /// Declaration that produced it first
        existing_path: String,
        /// Namespace being registered
        incoming_namespace: String,
        /// Declaration being registered
        incoming_path: String,
    },

    /// Same top-level name registered with different constants
    #[error("namespace {name} is already registered with different actions")]
    DuplicateNamespace {
        /// Top-level namespace name
        name: String,
    },

    /// Registration attempted after the initialization phase ended
    #[error("registry is sealed; cannot register namespace {namespace}")]
    Sealed {
        /// Namespace that was refused
        namespace: String,
    },

    /// Precompiled namespace was built under another naming convention
    #[error("namespace {namespace} was compiled under a different naming convention ({constant})")]
    ConventionMismatch {
        /// Namespace that was refused
        namespace: String,
        /// First constant that does not match
        constant: String,
    },

    /// Dispatched action type is not registered
    #[error("unknown action type {action_type}")]
    UnknownAction {
        /// The unregistered constant
        action_type: String,
    },

    /// Namespace failed to compile
    #[error("namespace error: {0}")]
    Namespace(#[from] NamespaceError),
}

impl RegistryError {
    /// Check if error is a cross-namespace collision
    #[inline]
    #[must_use]
    pub fn is_collision(&self) -> bool {
        matches!(
            self,
            Self::ConstantCollision { .. } | Self::DuplicateNamespace { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collision_message_names_both_sides() {
        let err = RegistryError::ConstantCollision {
            constant: "ETSY_SHOPS_SYNC".to_string(),
            existing_namespace: "Etsy".to_string(),
            existing_path: "Etsy.Shops.sync".to_string(),
            incoming_namespace: "EtsyShops".to_string(),
            incoming_path: "EtsyShops.sync".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("ETSY_SHOPS_SYNC"));
        assert!(msg.contains("namespace Etsy)"));
        assert!(msg.contains("namespace EtsyShops"));
        assert!(err.is_collision());
    }

    #[test]
    fn sealed_is_not_collision() {
        let err = RegistryError::Sealed {
            namespace: "Login".to_string(),
        };
        assert!(!err.is_collision());
        assert!(err.to_string().contains("sealed"));
    }
}
