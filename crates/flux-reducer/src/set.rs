//! Reducer routing table
//!
//! Provides [`ReducerSet`], which routes each dispatched action to the one
//! handler bound to its type.

use crate::reducer::Reducer;
use flux_namespace::{Action, ActionType};
use flux_registry::ActionRegistry;
use std::collections::HashMap;
use std::fmt;

/// All reducers of an application, indexed by action type
///
/// Every action type may be handled by at most one reducer.
pub struct ReducerSet<S> {
    reducers: Vec<Reducer<S>>,

    /// Action type -> (reducer index, handler index)
    routes: HashMap<ActionType, (usize, usize)>,
}

impl<S> ReducerSet<S> {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            reducers: Vec::new(),
            routes: HashMap::new(),
        }
    }

    /// Install a reducer after checking its bindings
    ///
    /// Nothing is installed if any binding fails.
    ///
    /// # Errors
    /// - [`ReducerError::UnknownActionType`] if a bound type is not in `registry`
    /// - [`ReducerError::DuplicateHandler`] if a type is already handled
    pub fn add(
        &mut self,
        reducer: Reducer<S>,
        registry: &ActionRegistry,
    ) -> Result<(), ReducerError> {
        let mut pending: HashMap<&ActionType, usize> = HashMap::new();

        for (index, action_type) in reducer.action_types().enumerate() {
            if !registry.contains(action_type.as_str()) {
                return Err(ReducerError::UnknownActionType {
                    reducer: reducer.name().to_string(),
                    action_type: action_type.to_string(),
                });
            }
            if let Some(&(owner, _)) = self.routes.get(action_type) {
                return Err(ReducerError::DuplicateHandler {
                    action_type: action_type.to_string(),
                    first: self.reducers[owner].name().to_string(),
                    second: reducer.name().to_string(),
                });
            }
            if pending.insert(action_type, index).is_some() {
                return Err(ReducerError::DuplicateHandler {
                    action_type: action_type.to_string(),
                    first: reducer.name().to_string(),
                    second: reducer.name().to_string(),
                });
            }
        }

        let reducer_index = self.reducers.len();
        let routes: Vec<_> = pending
            .into_iter()
            .map(|(action_type, handler_index)| {
                (action_type.clone(), (reducer_index, handler_index))
            })
            .collect();
        self.routes.extend(routes);

        tracing::debug!(
            "Installed reducer {} ({} handlers)",
            reducer.name(),
            reducer.len()
        );
        self.reducers.push(reducer);
        Ok(())
    }

    /// Apply the handler bound to `action`'s type
    ///
    /// Unbound types leave the state unchanged.
    pub fn reduce(&self, state: S, action: &Action) -> S {
        let handler = self
            .routes
            .get(action.action_type())
            .and_then(|&(reducer, handler)| self.reducers[reducer].handler(handler));

        match handler {
            Some(handler) => {
                tracing::trace!("Reducing {}", action.action_type());
                handler(state, action)
            }
            None => {
                tracing::trace!("No handler for {}", action.action_type());
                state
            }
        }
    }

    /// Check if an action type has a handler
    #[inline]
    #[must_use]
    pub fn handles(&self, action_type: &str) -> bool {
        self.routes.contains_key(action_type)
    }

    /// Reducer names in installation order
    #[must_use]
    pub fn reducer_names(&self) -> Vec<&str> {
        self.reducers.iter().map(Reducer::name).collect()
    }

    /// Number of bound action types
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if nothing is bound
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<S> Default for ReducerSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for ReducerSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerSet")
            .field("reducers", &self.reducers)
            .finish()
    }
}

/// Reducer binding errors
#[derive(Debug, thiserror::Error)]
pub enum ReducerError {
    /// Bound type is not registered
    #[error("reducer {reducer} handles unregistered action type {action_type}")]
    UnknownActionType {
        /// Reducer holding the binding
        reducer: String,
        /// The unregistered constant
        action_type: String,
    },

    /// Type bound twice
    #[error("action type {action_type} handled by both {first} and {second}")]
    DuplicateHandler {
        /// The constant
        action_type: String,
        /// Reducer bound first
        first: String,
        /// Reducer bound second
        second: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use flux_namespace::Namespace;

    fn registry() -> ActionRegistry {
        let mut registry = ActionRegistry::new();
        registry
            .register(&Namespace::new("Counter").add("inc").add("dec").add("reset"))
            .unwrap();
        registry
    }

    #[test]
    fn set_routes_to_bound_handler() {
        let registry = registry();
        let mut set = ReducerSet::new();
        set.add(
            Reducer::new("Counter")
                .on("COUNTER_INC", |n: i32, _| n + 1)
                .on("COUNTER_DEC", |n: i32, _| n - 1),
            &registry,
        )
        .unwrap();

        let state = set.reduce(0, &Action::new("COUNTER_INC", None));
        let state = set.reduce(state, &Action::new("COUNTER_INC", None));
        let state = set.reduce(state, &Action::new("COUNTER_DEC", None));
        assert_eq!(state, 1);
    }

    #[test]
    fn set_ignores_unbound_type() {
        let registry = registry();
        let mut set = ReducerSet::new();
        set.add(Reducer::new("Counter").on("COUNTER_INC", |n: i32, _| n + 1), &registry)
            .unwrap();

        assert_eq!(set.reduce(5, &Action::new("COUNTER_RESET", None)), 5);
        assert!(!set.handles("COUNTER_RESET"));
    }

    #[test]
    fn set_rejects_unregistered_type() {
        let registry = registry();
        let mut set: ReducerSet<i32> = ReducerSet::new();
        let result = set.add(Reducer::new("Counter").on("COUNTER_MUL", |n, _| n), &registry);

        assert!(matches!(result, Err(ReducerError::UnknownActionType { .. })));
        assert!(set.is_empty());
    }

    #[test]
    fn set_rejects_duplicate_within_reducer() {
        let registry = registry();
        let mut set: ReducerSet<i32> = ReducerSet::new();
        let result = set.add(
            Reducer::new("Counter")
                .on("COUNTER_INC", |n, _| n)
                .on("COUNTER_INC", |n, _| n),
            &registry,
        );
        assert!(matches!(result, Err(ReducerError::DuplicateHandler { .. })));
    }

    #[test]
    fn set_rejects_duplicate_across_reducers() {
        let registry = registry();
        let mut set: ReducerSet<i32> = ReducerSet::new();
        set.add(Reducer::new("Counter").on("COUNTER_INC", |n, _| n), &registry)
            .unwrap();

        let result = set.add(
            Reducer::new("Audit")
                .on("COUNTER_RESET", |n, _| n)
                .on("COUNTER_INC", |n, _| n),
            &registry,
        );
        match result {
            Err(ReducerError::DuplicateHandler { first, second, .. }) => {
                assert_eq!(first, "Counter");
                assert_eq!(second, "Audit");
            }
            other => panic!("expected DuplicateHandler, got {other:?}"),
        }
        // Partial bindings of the rejected reducer are not installed
        assert!(!set.handles("COUNTER_RESET"));
        assert_eq!(set.reducer_names(), ["Counter"]);
    }
}
