//! Error types for bond operations.

use bondcalc_core::CoreError;
use bondcalc_math::MathError;
use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur while scheduling or pricing a bond.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// The bond description violates an invariant.
    #[error("Invalid bond terms: {reason}")]
    InvalidTerms {
        /// Description of what's invalid.
        reason: String,
    },

    /// The variant tag names no supported bond type.
    #[error("Unsupported bond type: {name}")]
    UnsupportedBondType {
        /// The tag that was supplied.
        name: String,
    },

    /// A floating coupon period has no usable index fixing.
    #[error("Missing rate fixing for {index} period starting {date}")]
    MissingRateFixing {
        /// Accrual start of the period.
        date: String,
        /// Index the period references.
        index: String,
    },

    /// Neither a market price nor a quoted yield was supplied.
    #[error("No market price or quoted yield available to solve for a yield")]
    MissingYield,

    /// A price or yield is outside the region where discounting is defined.
    #[error("Invalid yield domain: {reason}")]
    InvalidYieldDomain {
        /// Description of the degenerate input.
        reason: String,
    },

    /// Yield calculation failed to converge.
    #[error("Yield calculation failed to converge after {iterations} iterations (residual: {residual:.2e})")]
    YieldConvergence {
        /// Number of iterations attempted.
        iterations: u32,
        /// Price residual at the last iterate.
        residual: f64,
    },

    /// Solver settings are unusable.
    #[error("Invalid solver configuration: {reason}")]
    InvalidSolverConfig {
        /// Description of the bad setting.
        reason: String,
    },

    /// Error from reference data (dates, conventions, calendars).
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl BondError {
    /// Creates an invalid terms error.
    #[must_use]
    pub fn invalid_terms(reason: impl Into<String>) -> Self {
        Self::InvalidTerms {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported bond type error.
    #[must_use]
    pub fn unsupported_bond_type(name: impl Into<String>) -> Self {
        Self::UnsupportedBondType { name: name.into() }
    }

    /// Creates a missing rate fixing error.
    #[must_use]
    pub fn missing_rate_fixing(date: impl ToString, index: impl Into<String>) -> Self {
        Self::MissingRateFixing {
            date: date.to_string(),
            index: index.into(),
        }
    }

    /// Creates an invalid yield domain error.
    #[must_use]
    pub fn invalid_yield_domain(reason: impl Into<String>) -> Self {
        Self::InvalidYieldDomain {
            reason: reason.into(),
        }
    }
}

impl From<MathError> for BondError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::ConvergenceFailed {
                iterations,
                residual,
            } => Self::YieldConvergence {
                iterations,
                residual,
            },
            MathError::OutOfDomain { value } => {
                Self::invalid_yield_domain(format!("yield {value} makes a discount factor undefined"))
            }
            MathError::DivisionByZero { value } => Self::invalid_yield_domain(format!(
                "price is insensitive to yield (derivative {value:.2e})"
            )),
            MathError::InvalidInput { reason } => Self::InvalidSolverConfig { reason },
        }
    }
}
