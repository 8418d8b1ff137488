//! Flux Action Registry
//!
//! Process-wide aggregate of compiled action constants with collision
//! detection.
//!
//! # Overview
//!
//! - **ActionRegistry**: merges top-level namespaces, rejects collisions
//! - **SharedRegistry**: `Arc<RwLock<_>>` handle for the write-then-read lifecycle
//! - **CollisionDiagnostic**: suggested fixes for rejected registrations
//!
//! The registry is an explicit value handed to each feature module's setup
//! function rather than a global.
//!
//! # Example
//!
//! ```rust
//! use flux_namespace::Namespace;
//! use flux_registry::{ActionRegistry, RegistryError};
//!
//! let mut registry = ActionRegistry::new();
//! registry.register(&Namespace::new("Etsy").add(Namespace::new("Shops").add("sync"))).unwrap();
//!
//! let clash = registry.register(&Namespace::new("EtsyShops").add("sync"));
//! assert!(matches!(clash, Err(RegistryError::ConstantCollision { .. })));
//!
//! registry.seal();
//! assert!(registry.contains("ETSY_SHOPS_SYNC"));
//! ```

#![warn(missing_docs)]

pub mod diagnostic;
pub mod error;
pub mod registry;
pub mod shared;

// Re-exports
pub use diagnostic::{CollisionDiagnostic, ConflictKind, ResolutionSuggestion};
pub use error::RegistryError;
pub use registry::{ActionRegistry, NamespaceRecord, RegisteredConstant};
pub use shared::SharedRegistry;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
