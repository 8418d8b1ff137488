//! Action records and action creators
//!
//! An [`ActionCreator`] is bound to exactly one compiled [`ActionType`] and
//! produces plain [`Action`] records for the dispatch layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};

/// Compiled constant string, e.g. `LOGIN_SUBMIT_PENDING`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionType(String);

impl ActionType {
    /// Wrap a constant string
    #[inline]
    #[must_use]
    pub fn new(constant: impl Into<String>) -> Self {
        Self(constant.into())
    }

    /// Constant as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ActionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ActionType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ActionType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ActionType {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ActionType {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&str> for ActionType {
    fn from(constant: &str) -> Self {
        Self::new(constant)
    }
}

impl From<String> for ActionType {
    fn from(constant: String) -> Self {
        Self(constant)
    }
}

impl From<&ActionType> for ActionType {
    fn from(action_type: &ActionType) -> Self {
        action_type.clone()
    }
}

/// Phase of an asynchronous action
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsyncPhase {
    /// Request issued
    Pending,
    /// Request completed
    Success,
    /// Request failed
    Failure,
}

impl AsyncPhase {
    /// All phases in declaration order
    pub const ALL: [Self; 3] = [Self::Pending, Self::Success, Self::Failure];

    /// Lowercase phase name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl Display for AsyncPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain dispatchable action record
///
/// Serializes as `{ "type": ..., "payload": ... }`; `payload` is omitted
/// when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Compiled constant identifying the action
    #[serde(rename = "type")]
    pub action_type: ActionType,

    /// Optional payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Action {
    /// Create action record
    #[inline]
    #[must_use]
    pub fn new(action_type: impl Into<ActionType>, payload: Option<Value>) -> Self {
        Self {
            action_type: action_type.into(),
            payload,
        }
    }

    /// Constant of this action
    #[inline]
    #[must_use]
    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    /// Payload, if any
    #[inline]
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Check the action's constant
    #[inline]
    #[must_use]
    pub fn is(&self, constant: &str) -> bool {
        self.action_type.as_str() == constant
    }
}

/// Callable bound to one compiled constant
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionCreator {
    action_type: ActionType,
}

impl ActionCreator {
    /// Bind a creator to a constant
    #[inline]
    #[must_use]
    pub fn new(action_type: ActionType) -> Self {
        Self { action_type }
    }

    /// Constant this creator produces
    #[inline]
    #[must_use]
    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    /// Create action with payload
    #[must_use]
    pub fn call(&self, payload: impl Into<Value>) -> Action {
        Action::new(self.action_type.clone(), Some(payload.into()))
    }

    /// Create action without payload
    #[must_use]
    pub fn empty(&self) -> Action {
        Action::new(self.action_type.clone(), None)
    }

    /// Create action from any serializable payload
    ///
    /// # Errors
    /// Returns error if `payload` cannot be converted to JSON
    pub fn with<P: Serialize>(&self, payload: &P) -> Result<Action, serde_json::Error> {
        Ok(self.call(serde_json::to_value(payload)?))
    }
}

/// Pending, success and failure creators of one async action
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AsyncCreators {
    pending: ActionCreator,
    success: ActionCreator,
    failure: ActionCreator,
}

impl AsyncCreators {
    /// Group three phase creators
    #[inline]
    #[must_use]
    pub fn new(pending: ActionCreator, success: ActionCreator, failure: ActionCreator) -> Self {
        Self {
            pending,
            success,
            failure,
        }
    }

    /// Pending phase creator
    #[inline]
    #[must_use]
    pub fn pending(&self) -> &ActionCreator {
        &self.pending
    }

    /// Success phase creator
    #[inline]
    #[must_use]
    pub fn success(&self) -> &ActionCreator {
        &self.success
    }

    /// Failure phase creator
    #[inline]
    #[must_use]
    pub fn failure(&self) -> &ActionCreator {
        &self.failure
    }

    /// Creator for a phase
    #[inline]
    #[must_use]
    pub fn phase(&self, phase: AsyncPhase) -> &ActionCreator {
        match phase {
            AsyncPhase::Pending => &self.pending,
            AsyncPhase::Success => &self.success,
            AsyncPhase::Failure => &self.failure,
        }
    }

    /// Constants of all three phases
    #[must_use]
    pub fn action_types(&self) -> [&ActionType; 3] {
        [
            self.pending.action_type(),
            self.success.action_type(),
            self.failure.action_type(),
        ]
    }
}
