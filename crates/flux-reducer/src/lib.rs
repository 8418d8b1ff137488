//! Flux Reducers
//!
//! Binds pure state transition handlers to registered action constants and
//! routes dispatched actions to them.
//!
//! # Example
//!
//! ```rust
//! use flux_namespace::Namespace;
//! use flux_reducer::{Reducer, ReducerSet};
//! use flux_registry::ActionRegistry;
//!
//! let mut registry = ActionRegistry::new();
//! let creators = registry
//!     .register(&Namespace::new("Login").add("setState"))
//!     .unwrap()
//!     .into_creators();
//! let set_state = creators.sync("setState").unwrap();
//!
//! let mut reducers = ReducerSet::new();
//! reducers
//!     .add(
//!         Reducer::new("Login").on(set_state.action_type(), |_: String, action| {
//!             action.payload().and_then(|p| p.as_str()).unwrap_or_default().to_string()
//!         }),
//!         &registry,
//!     )
//!     .unwrap();
//!
//! let state = reducers.reduce(String::new(), &set_state.call("signup"));
//! assert_eq!(state, "signup");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod reducer;
mod set;

// Re-exports
pub use reducer::{Handler, Reducer};
pub use set::{ReducerError, ReducerSet};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
