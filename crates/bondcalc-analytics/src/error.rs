//! Error types for the analytics engine.
//!
//! [`EngineError`] is the only error `compute_analytics` returns. Each error
//! falls into one [`ErrorKind`], which tells the caller whether retrying with
//! more data can succeed.

use bondcalc_bonds::BondError;
use bondcalc_core::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A specialized Result type for analytics operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors returned by the analytics engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Error from scheduling, pricing or validating the bond.
    #[error(transparent)]
    Bond(#[from] BondError),

    /// The engine configuration is unusable.
    #[error("Invalid engine configuration: {reason}")]
    InvalidConfig {
        /// Description of the bad setting.
        reason: String,
    },

    /// A risk metric is undefined for the solved price and yield.
    #[error("Risk calculation failed: {reason}")]
    RiskCalculation {
        /// Description of the degenerate input.
        reason: String,
    },
}

impl EngineError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Creates a risk calculation error.
    #[must_use]
    pub fn risk_calculation(reason: impl Into<String>) -> Self {
        Self::RiskCalculation {
            reason: reason.into(),
        }
    }

    /// Classifies the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfig { .. } => ErrorKind::Configuration,
            Self::RiskCalculation { .. } => ErrorKind::InvalidYieldDomain,
            Self::Bond(err) => match err {
                BondError::InvalidTerms { .. } => ErrorKind::InvalidBondTerms,
                BondError::UnsupportedBondType { .. } => ErrorKind::UnsupportedBondType,
                BondError::MissingRateFixing { .. } => ErrorKind::MissingRateFixing,
                BondError::MissingYield => ErrorKind::MissingYield,
                BondError::InvalidYieldDomain { .. } => ErrorKind::InvalidYieldDomain,
                BondError::YieldConvergence { .. } => ErrorKind::YieldConvergence,
                BondError::InvalidSolverConfig { .. } => ErrorKind::Configuration,
                BondError::Core(core) => match core {
                    CoreError::InvalidDate { .. } => ErrorKind::InvalidBondTerms,
                    CoreError::UnsupportedConvention { .. } => ErrorKind::UnsupportedConvention,
                    CoreError::ConfigError { .. } => ErrorKind::Configuration,
                },
            },
        }
    }

    /// Returns true if the caller can succeed by retrying with more data or
    /// different solver settings.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }
}

impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        Self::Bond(BondError::Core(err))
    }
}

/// Error taxonomy exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Bad calendar, business-day rule or engine setting.
    Configuration,
    /// Unrecognized day-count convention.
    UnsupportedConvention,
    /// The bond description violates an invariant.
    InvalidBondTerms,
    /// A floating period lacks an index fixing.
    MissingRateFixing,
    /// No price or yield to work from.
    MissingYield,
    /// Numerically degenerate price or yield.
    InvalidYieldDomain,
    /// The yield solver exhausted its iteration budget.
    YieldConvergence,
    /// The variant tag is not supported.
    UnsupportedBondType,
}

impl ErrorKind {
    /// Returns true for the kinds a caller can fix by supplying more data
    /// or retrying the solve.
    #[must_use]
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::MissingRateFixing | Self::MissingYield | Self::YieldConvergence
        )
    }
}
