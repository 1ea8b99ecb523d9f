//! Engine configuration.

use serde::{Deserialize, Serialize};

use bondcalc_bonds::pricing::{
    DerivativeMethod, YieldSolver, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE_FACTOR,
};
use bondcalc_bonds::types::{Validate, ValidationError, DEFAULT_SETTLEMENT_DAYS};

use crate::error::{EngineError, EngineResult};

/// Numerical settings for analytics computations.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use bondcalc_analytics::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "max_iterations": 50 }"#).unwrap();
/// assert_eq!(config.max_iterations, 50);
/// assert_eq!(config.bump_size, 0.0001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Convergence when `|P - target| < factor × face`.
    #[serde(default = "default_price_tolerance_factor")]
    pub price_tolerance_factor: f64,

    /// Newton iteration cap.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Starting yield for bonds without a positive coupon rate.
    #[serde(default = "default_initial_guess")]
    pub initial_guess: f64,

    /// Yield bump for simple duration.
    #[serde(default = "default_bump_size")]
    pub bump_size: f64,

    /// Settlement lag for terms built without one.
    #[serde(default = "default_settlement_days")]
    pub default_settlement_days: u32,

    /// How the solver obtains `P'(y)`.
    #[serde(default)]
    pub derivative: DerivativeMethod,
}

fn default_price_tolerance_factor() -> f64 {
    DEFAULT_TOLERANCE_FACTOR
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

fn default_initial_guess() -> f64 {
    0.05
}

fn default_bump_size() -> f64 {
    0.0001
}

fn default_settlement_days() -> u32 {
    DEFAULT_SETTLEMENT_DAYS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            price_tolerance_factor: default_price_tolerance_factor(),
            max_iterations: default_max_iterations(),
            initial_guess: default_initial_guess(),
            bump_size: default_bump_size(),
            default_settlement_days: default_settlement_days(),
            derivative: DerivativeMethod::default(),
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from JSON, filling absent fields with defaults.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        serde_json::from_str(json).map_err(|e| EngineError::invalid_config(e.to_string()))
    }

    /// Builder method to set the tolerance factor.
    pub fn with_price_tolerance_factor(mut self, factor: f64) -> Self {
        self.price_tolerance_factor = factor;
        self
    }

    /// Builder method to set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method to set the fallback initial guess.
    pub fn with_initial_guess(mut self, guess: f64) -> Self {
        self.initial_guess = guess;
        self
    }

    /// Builder method to set the simple-duration bump.
    pub fn with_bump_size(mut self, bump: f64) -> Self {
        self.bump_size = bump;
        self
    }

    /// Builder method to set the derivative method.
    pub fn with_derivative(mut self, derivative: DerivativeMethod) -> Self {
        self.derivative = derivative;
        self
    }

    /// Returns the yield solver these settings describe.
    pub fn solver(&self) -> YieldSolver {
        YieldSolver::new()
            .with_tolerance_factor(self.price_tolerance_factor)
            .with_max_iterations(self.max_iterations)
            .with_derivative(self.derivative)
    }

    /// Validates and reports violations as [`EngineError::InvalidConfig`].
    pub fn check(&self) -> EngineResult<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let reason = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(EngineError::invalid_config(reason))
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.price_tolerance_factor > 0.0 && self.price_tolerance_factor <= 1e-4) {
            errors.push(ValidationError::with_rule(
                "price_tolerance_factor",
                "Price tolerance factor must be between 0 and 1e-4",
                "valid_tolerance",
            ));
        }

        if self.max_iterations == 0 || self.max_iterations > 10000 {
            errors.push(ValidationError::with_rule(
                "max_iterations",
                "Max iterations must be between 1 and 10000",
                "valid_iterations",
            ));
        }

        if !(self.bump_size > 0.0 && self.bump_size <= 0.01) {
            errors.push(ValidationError::with_rule(
                "bump_size",
                "Bump size must be between 0 and 0.01",
                "valid_bump",
            ));
        }

        if !self.initial_guess.is_finite() || self.initial_guess <= -1.0 {
            errors.push(ValidationError::new(
                "initial_guess",
                "Initial guess must be a finite yield above -100%",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.price_tolerance_factor, 1e-8);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.initial_guess, 0.05);
        assert_eq!(config.default_settlement_days, 2);
        assert_eq!(config.derivative, DerivativeMethod::Analytic);
        assert!(config.is_valid());
    }

    #[test]
    fn test_partial_json() {
        let config =
            EngineConfig::from_json(r#"{ "derivative": "FINITE_DIFFERENCE", "bump_size": 0.001 }"#)
                .unwrap();
        assert_eq!(config.derivative, DerivativeMethod::FiniteDifference);
        assert_eq!(config.bump_size, 0.001);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.solver().derivative(), DerivativeMethod::FiniteDifference);
    }

    #[test]
    fn test_malformed_json() {
        let err = EngineConfig::from_json("{ max_iterations: }").unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig { .. }));
    }

    #[test]
    fn test_validation_rules() {
        let config = EngineConfig::default()
            .with_price_tolerance_factor(0.0)
            .with_max_iterations(0)
            .with_bump_size(0.5);

        let errors = config.validate();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].rule.as_deref(), Some("valid_tolerance"));
        assert_eq!(errors[1].field, "max_iterations");

        let err = config.check().unwrap_err();
        assert!(err.to_string().contains("bump_size: Bump size must be between 0 and 0.01"));
    }

    #[test]
    fn test_nan_tolerance_rejected() {
        let config = EngineConfig::default().with_price_tolerance_factor(f64::NAN);
        assert!(!config.is_valid());
    }
}
