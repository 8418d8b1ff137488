//! Action paths and segment normalization
//!
//! Provides [`ActionPath`] for addressing a declared action from its root
//! namespace, and [`normalize_segment`] for turning a declared name into a
//! constant word group.

use heck::ToShoutySnakeCase;
use smallvec::SmallVec;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Path from the root namespace to a declared action
///
/// Segments are kept exactly as declared; normalization only happens when a
/// constant is derived from the path.
///
/// # Examples
/// - `["Login", "submit"]` → `Login.submit`
/// - `["Etsy", "Shops", "set_state_filter"]` → `Etsy.Shops.set_state_filter`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ActionPath(SmallVec<[String; 4]>);

impl ActionPath {
    /// Create new path from segments
    #[inline]
    #[must_use]
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Empty path
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(SmallVec::new())
    }

    /// Local name of the action (last segment)
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Append a segment, returning new path
    #[inline]
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.0.push(segment.into());
        new
    }

    /// Normalize every segment and join them with `separator`
    ///
    /// # Errors
    /// Returns error if the path is empty or any segment is not a valid name
    pub fn to_constant(&self, separator: &str) -> Result<String, PathError> {
        if self.0.is_empty() {
            return Err(PathError::EmptyPath);
        }
        let words = self
            .0
            .iter()
            .map(|segment| normalize_segment(segment))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(words.join(separator))
    }
}

impl Display for ActionPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for ActionPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }

        let segments = s
            .split('.')
            .map(|seg| validate_segment(seg).map(|()| seg.to_string()))
            .collect::<Result<SmallVec<_>, _>>()?;

        Ok(Self(segments))
    }
}

/// Check that a declared name can become part of a constant
///
/// Allowed: ASCII alphanumerics, `_` and spaces, with at least one
/// alphanumeric character.
///
/// # Errors
/// Returns [`PathError::EmptySegment`] or [`PathError::InvalidSegment`]
pub fn validate_segment(segment: &str) -> Result<(), PathError> {
    if segment.is_empty() {
        return Err(PathError::EmptySegment);
    }
    if let Some(bad) = segment
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == ' '))
    {
        return Err(PathError::InvalidSegment {
            segment: segment.to_string(),
            reason: format!("character {bad:?} is not allowed"),
        });
    }
    if !segment.chars().any(|c| c.is_ascii_alphanumeric()) {
        return Err(PathError::InvalidSegment {
            segment: segment.to_string(),
            reason: "no alphanumeric characters".to_string(),
        });
    }
    Ok(())
}

/// Normalize a declared name into upper-snake-case
///
/// Word boundaries are camelCase humps, acronym ends, underscores and
/// spaces: `setStateFilter`, `set_state_filter` and `set state filter` all
/// become `SET_STATE_FILTER`.
///
/// # Errors
/// Returns error if the segment fails [`validate_segment`]
pub fn normalize_segment(segment: &str) -> Result<String, PathError> {
    validate_segment(segment)?;
    Ok(segment.to_shouty_snake_case())
}

/// Errors related to action paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Path has no segments
    #[error("action path is empty")]
    EmptyPath,

    /// Empty segment in path
    #[error("name is empty")]
    EmptySegment,

    /// Segment cannot be turned into a constant
    #[error("invalid name '{segment}': {reason}")]
    InvalidSegment {
        /// Offending name as declared
        segment: String,
        /// What is wrong with it
        reason: String,
    },
}
