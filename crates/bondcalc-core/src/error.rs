//! Error types for core reference data.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building dates or resolving conventions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A day-count or compounding convention name was not recognized.
    #[error("Unsupported {kind} convention: '{name}'")]
    UnsupportedConvention {
        /// Which family of convention was being parsed.
        kind: &'static str,
        /// The name that failed to parse.
        name: String,
    },

    /// Bad reference-data configuration (calendar or business-day rule).
    #[error("Configuration error: {reason}")]
    ConfigError {
        /// Description of the configuration error.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an unsupported convention error.
    #[must_use]
    pub fn unsupported_convention(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnsupportedConvention {
            kind,
            name: name.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::ConfigError {
            reason: reason.into(),
        }
    }
}
