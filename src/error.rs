//! Error types for config validation.

use thiserror::Error;

/// Category of a rejected config, used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A field is present but holds the wrong kind of value.
    Type,
    /// A numeric field is outside its allowed range.
    Range,
}

/// Reason a config was rejected before any computation ran.
///
/// Both variants abort the whole operation; no partial result is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A field is missing, not of the expected kind, or not a number.
    #[error("config property {field} {reason}")]
    TypeViolation {
        /// Name of the offending field.
        field: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A numeric field is negative where it must not be, zero where it must
    /// be strictly positive, or a count above
    /// [`MAX_NOTES`](crate::config::MAX_NOTES).
    #[error("config property {field} {reason}")]
    RangeViolation {
        /// Name of the offending field.
        field: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn type_violation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TypeViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn range_violation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RangeViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Which check rejected the config.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TypeViolation { .. } => ErrorKind::Type,
            Self::RangeViolation { .. } => ErrorKind::Range,
        }
    }

    /// Name of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            Self::TypeViolation { field, .. } | Self::RangeViolation { field, .. } => field,
        }
    }
}
