//! Naming convention configuration
//!
//! Provides [`NamingConvention`], the single place where the constant
//! separator and async phase suffixes are decided.

use crate::action::{ActionType, AsyncPhase};
use crate::path::{ActionPath, PathError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How action paths become constant strings
///
/// Defaults: `_` separator, `PENDING` / `SUCCESS` / `FAILURE` suffixes.
///
/// # Example
/// ```
/// use flux_namespace::NamingConvention;
///
/// let convention = NamingConvention::from_toml_str(r#"
///     pending_suffix = "STARTED"
///     success_suffix = "SUCCEEDED"
///     failure_suffix = "FAILED"
/// "#).unwrap();
/// assert_eq!(convention.separator, "_");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConvention {
    /// Joins normalized path segments and phase suffixes
    pub separator: String,
    /// Suffix of the pending phase constant
    pub pending_suffix: String,
    /// Suffix of the success phase constant
    pub success_suffix: String,
    /// Suffix of the failure phase constant
    pub failure_suffix: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            separator: "_".to_string(),
            pending_suffix: "PENDING".to_string(),
            success_suffix: "SUCCESS".to_string(),
            failure_suffix: "FAILURE".to_string(),
        }
    }
}

impl NamingConvention {
    /// Create default convention
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With separator
    #[inline]
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// With async phase suffixes
    #[inline]
    #[must_use]
    pub fn with_suffixes(
        mut self,
        pending: impl Into<String>,
        success: impl Into<String>,
        failure: impl Into<String>,
    ) -> Self {
        self.pending_suffix = pending.into();
        self.success_suffix = success.into();
        self.failure_suffix = failure.into();
        self
    }

    /// Parse and validate a TOML document
    ///
    /// Missing keys fall back to the defaults.
    ///
    /// # Errors
    /// Returns error if the document does not parse or the result is invalid
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let convention: Self = toml::from_str(source)?;
        convention.validate()?;
        Ok(convention)
    }

    /// Load and validate a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or [`Self::from_toml_str`] fails
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Check the convention can produce unambiguous constants
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] describing the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.separator.is_empty() {
            return Err(ConfigError::invalid("separator is empty"));
        }
        if self.separator.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::invalid(format!(
                "separator '{}' contains alphanumeric characters",
                self.separator
            )));
        }

        let suffixes = [
            ("pending_suffix", &self.pending_suffix),
            ("success_suffix", &self.success_suffix),
            ("failure_suffix", &self.failure_suffix),
        ];
        for (key, suffix) in suffixes {
            let well_formed = suffix.starts_with(|c: char| c.is_ascii_uppercase())
                && suffix
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
            if !well_formed {
                return Err(ConfigError::invalid(format!(
                    "{key} '{suffix}' must be an upper-snake-case word"
                )));
            }
        }

        if self.pending_suffix == self.success_suffix
            || self.pending_suffix == self.failure_suffix
            || self.success_suffix == self.failure_suffix
        {
            return Err(ConfigError::invalid("async phase suffixes must be distinct"));
        }

        Ok(())
    }

    /// Suffix used for a phase
    #[inline]
    #[must_use]
    pub fn suffix(&self, phase: AsyncPhase) -> &str {
        match phase {
            AsyncPhase::Pending => &self.pending_suffix,
            AsyncPhase::Success => &self.success_suffix,
            AsyncPhase::Failure => &self.failure_suffix,
        }
    }

    /// Constant for a synchronous action, or the base of an async one
    ///
    /// # Errors
    /// Returns error if any path segment is not a valid name
    pub fn constant_for(&self, path: &ActionPath) -> Result<ActionType, PathError> {
        path.to_constant(&self.separator).map(ActionType::new)
    }

    /// Constant for one phase of an async action
    #[must_use]
    pub fn phase_constant(&self, base: &ActionType, phase: AsyncPhase) -> ActionType {
        ActionType::new(format!(
            "{}{}{}",
            base.as_str(),
            self.separator,
            self.suffix(phase)
        ))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure
    #[error("failed to parse naming convention: {0}")]
    Parse(#[from] toml::de::Error),

    /// File could not be read
    #[error("failed to read naming convention: {0}")]
    Io(#[from] std::io::Error),

    /// Parsed but unusable
    #[error("invalid naming convention: {reason}")]
    Invalid {
        /// What is wrong
        reason: String,
    },
}

impl ConfigError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}
