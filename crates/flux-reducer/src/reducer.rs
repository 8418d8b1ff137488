//! Named reducers
//!
//! Provides [`Reducer`], a fluent builder binding compiled action constants
//! to pure state transition handlers.

use flux_namespace::{Action, ActionType};
use std::fmt;

/// State transition for one action type
pub type Handler<S> = Box<dyn Fn(S, &Action) -> S + Send + Sync>;

/// Named set of handlers, usually one per feature module
///
/// Bindings are only checked when the reducer is added to a
/// [`ReducerSet`](crate::ReducerSet).
pub struct Reducer<S> {
    name: String,
    handlers: Vec<(ActionType, Handler<S>)>,
}

impl<S> Reducer<S> {
    /// Create empty reducer
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: Vec::new(),
        }
    }

    /// Bind a handler to an action type
    #[must_use]
    pub fn on<F>(mut self, action_type: impl Into<ActionType>, handler: F) -> Self
    where
        F: Fn(S, &Action) -> S + Send + Sync + 'static,
    {
        self.handlers.push((action_type.into(), Box::new(handler)));
        self
    }

    /// Reducer name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bound action types in binding order
    pub fn action_types(&self) -> impl Iterator<Item = &ActionType> {
        self.handlers.iter().map(|(action_type, _)| action_type)
    }

    /// Number of bindings
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if nothing is bound
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub(crate) fn handler(&self, index: usize) -> Option<&Handler<S>> {
        self.handlers.get(index).map(|(_, handler)| handler)
    }
}

impl<S> fmt::Debug for Reducer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer")
            .field("name", &self.name)
            .field("action_types", &self.action_types().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reducer_new_empty() {
        let reducer: Reducer<u32> = Reducer::new("Login");
        assert_eq!(reducer.name(), "Login");
        assert!(reducer.is_empty());
    }

    #[test]
    fn reducer_on_keeps_binding_order() {
        let reducer = Reducer::new("Login")
            .on("LOGIN_SUBMIT_PENDING", |n: u32, _| n + 1)
            .on("LOGIN_SET_STATE", |n: u32, _| n);

        let types: Vec<_> = reducer.action_types().map(ActionType::as_str).collect();
        assert_eq!(types, ["LOGIN_SUBMIT_PENDING", "LOGIN_SET_STATE"]);
        assert_eq!(reducer.len(), 2);
    }

    #[test]
    fn reducer_handler_runs() {
        let reducer = Reducer::new("Counter").on("COUNTER_INC", |n: u32, _| n + 1);
        let action = Action::new("COUNTER_INC", None);
        let handler = reducer.handler(0).unwrap();
        assert_eq!(handler(1, &action), 2);
    }

    #[test]
    fn reducer_debug_lists_types() {
        let reducer = Reducer::new("Counter").on("COUNTER_INC", |n: u32, _| n);
        let debug = format!("{reducer:?}");
        assert!(debug.contains("Counter"));
        assert!(debug.contains("COUNTER_INC"));
    }
}
