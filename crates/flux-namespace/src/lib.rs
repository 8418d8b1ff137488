//! Flux Action Namespaces
//!
//! Hierarchical action namespaces compiled into constants and action
//! creators.
//!
//! # Overview
//!
//! - **Namespace**: by-value builder of actions and child namespaces
//! - **CompiledNamespace**: flat constant table plus a creator tree
//! - **NamingConvention**: separator and async phase suffixes, loadable from TOML
//!
//! # Example
//!
//! ```rust
//! use flux_namespace::Namespace;
//! use serde_json::json;
//!
//! let creators = Namespace::new("Login")
//!     .add_async("submit")
//!     .add("setState")
//!     .action_creators()
//!     .unwrap();
//!
//! let action = creators.async_action("submit").unwrap().pending().call(json!({"email": "a@b.c"}));
//! assert!(action.is("LOGIN_SUBMIT_PENDING"));
//!
//! let action = creators.sync("setState").unwrap().call("signup");
//! assert!(action.is("LOGIN_SET_STATE"));
//! ```

#![warn(missing_docs)]

pub mod action;
pub mod compile;
pub mod config;
pub mod fingerprint;
pub mod namespace;
pub mod path;

// Re-exports
pub use action::{Action, ActionCreator, ActionType, AsyncCreators, AsyncPhase};
pub use compile::{CompiledNamespace, ConstantInfo, ConstantTable, CreatorGroup, CreatorNode};
pub use config::{ConfigError, NamingConvention};
pub use fingerprint::Fingerprint;
pub use namespace::{ActionDecl, ActionKind, Member, Namespace, NamespaceError};
pub use path::{normalize_segment, ActionPath, PathError};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for declaring and dispatching actions
    pub use crate::{
        Action, ActionCreator, ActionType, AsyncCreators, AsyncPhase, CompiledNamespace,
        CreatorGroup, CreatorNode, Namespace, NamespaceError, NamingConvention,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
