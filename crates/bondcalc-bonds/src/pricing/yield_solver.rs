//! Yield-from-price solver.
//!
//! # Example
//!
//! ```rust
//! use bondcalc_bonds::pricing::{price_from_yield, PricingContext, YieldSolver};
//! use bondcalc_core::daycounts::DayCountConvention;
//! use bondcalc_core::types::{CashFlow, CashFlowSchedule, Compounding, Date};
//! use rust_decimal_macros::dec;
//!
//! let settlement = Date::from_ymd(2025, 1, 1).unwrap();
//! let flows: CashFlowSchedule = vec![CashFlow::final_payment(
//!     Date::from_ymd(2030, 1, 1).unwrap(),
//!     dec!(0),
//!     dec!(1000),
//!     settlement,
//! )]
//! .into_iter()
//! .collect();
//! let ctx = PricingContext {
//!     settlement,
//!     day_count: DayCountConvention::Act365Fixed,
//!     compounding: Compounding::default(),
//!     face_value: 1000.0,
//! };
//!
//! let result = YieldSolver::new().solve(&flows, 780.0, &ctx, 0.05).unwrap();
//! let repriced = price_from_yield(&flows, result.yield_value, &ctx).unwrap();
//! assert!((repriced - 780.0).abs() < 1e-5);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use bondcalc_core::types::CashFlowSchedule;
use bondcalc_math::solvers::{central_difference, newton_raphson_guarded, SolverConfig};

use super::{DiscountedFlows, PricingContext};
use crate::error::{BondError, BondResult};

/// Default residual tolerance per unit of face value.
pub const DEFAULT_TOLERANCE_FACTOR: f64 = 1e-8;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// How the solver obtains the price derivative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DerivativeMethod {
    /// Closed-form derivative of each discount factor.
    #[default]
    Analytic,
    /// Central difference of the price function.
    FiniteDifference,
}

/// Result of a yield calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldResult {
    /// The yield, as a decimal (0.05 for 5%).
    pub yield_value: f64,
    /// Newton steps taken.
    pub iterations: u32,
    /// Price error at the returned yield.
    pub residual: f64,
}

/// Solves for the yield that reprices a set of cash flows.
///
/// Converges when `|price(y) - target| < tolerance_factor × face`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldSolver {
    tolerance_factor: f64,
    max_iterations: u32,
    derivative: DerivativeMethod,
}

impl Default for YieldSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl YieldSolver {
    /// Creates a solver with the default tolerance and iteration cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tolerance_factor: DEFAULT_TOLERANCE_FACTOR,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            derivative: DerivativeMethod::Analytic,
        }
    }

    /// Sets the tolerance per unit of face value.
    #[must_use]
    pub fn with_tolerance_factor(mut self, tolerance_factor: f64) -> Self {
        self.tolerance_factor = tolerance_factor;
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the derivative method.
    #[must_use]
    pub fn with_derivative(mut self, derivative: DerivativeMethod) -> Self {
        self.derivative = derivative;
        self
    }

    /// Returns the tolerance per unit of face value.
    #[must_use]
    pub fn tolerance_factor(&self) -> f64 {
        self.tolerance_factor
    }

    /// Returns the iteration cap.
    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Returns the derivative method.
    #[must_use]
    pub fn derivative(&self) -> DerivativeMethod {
        self.derivative
    }

    /// Solves for the yield of `flows` at a dirty price.
    ///
    /// # Errors
    ///
    /// See [`DiscountedFlows::new`] and [`YieldSolver::yield_from_price`].
    pub fn solve(
        &self,
        flows: &CashFlowSchedule,
        dirty_price: f64,
        ctx: &PricingContext,
        initial_guess: f64,
    ) -> BondResult<YieldResult> {
        let discounted = DiscountedFlows::new(flows, ctx)?;
        self.yield_from_price(&discounted, dirty_price, ctx.face_value, initial_guess)
    }

    /// Solves for the yield of pre-discounted flows at a dirty price.
    ///
    /// # Errors
    ///
    /// - `BondError::InvalidTerms` if no cash flows remain
    /// - `BondError::InvalidYieldDomain` if the price is not positive, the
    ///   guess makes a discount factor non-positive, or the iteration leaves
    ///   the domain
    /// - `BondError::YieldConvergence` if the iteration cap is reached
    pub fn yield_from_price(
        &self,
        flows: &DiscountedFlows,
        dirty_price: f64,
        face_value: f64,
        initial_guess: f64,
    ) -> BondResult<YieldResult> {
        if flows.is_empty() {
            return Err(BondError::invalid_terms("No future cash flows"));
        }
        if !dirty_price.is_finite() || dirty_price <= 0.0 {
            return Err(BondError::invalid_yield_domain(format!(
                "price {dirty_price} must be positive"
            )));
        }
        if !flows.is_valid_yield(initial_guess) {
            return Err(BondError::invalid_yield_domain(format!(
                "initial guess {initial_guess} gives a non-positive discount factor"
            )));
        }

        let config = SolverConfig::new(self.tolerance_factor * face_value, self.max_iterations);
        let objective = |y: f64| flows.price(y) - dirty_price;
        let in_domain = |y: f64| flows.is_valid_yield(y);

        let result = match self.derivative {
            DerivativeMethod::Analytic => newton_raphson_guarded(
                objective,
                |y| flows.price_derivative(y),
                in_domain,
                initial_guess,
                &config,
            ),
            DerivativeMethod::FiniteDifference => newton_raphson_guarded(
                objective,
                |y| central_difference(|x| flows.price(x), y),
                in_domain,
                initial_guess,
                &config,
            ),
        }?;

        debug!(
            "yield {:.10} for dirty price {:.6} after {} iterations",
            result.root, dirty_price, result.iterations
        );

        Ok(YieldResult {
            yield_value: result.root,
            iterations: result.iterations,
            residual: result.residual,
        })
    }
}
