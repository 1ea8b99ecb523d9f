//! Discounting and yield solving.
//!
//! A cash flow at year fraction `t` from settlement is discounted with the
//! bond's [`Compounding`] convention, with `t` measured by the bond's day
//! count. The sum of discounted flows is the dirty price.
//!
//! - [`DiscountedFlows`]: cash flows reduced to `(t, amount)` pairs
//! - [`YieldSolver`]: yield from price by guarded Newton-Raphson
//! - [`yield_to_worst`]: minimum yield over exercise dates and maturity
//! - [`decimal_to_f64`]: checked conversion of decimal terms into floats

mod workout;
mod yield_solver;

pub use workout::{yield_to_worst, ExerciseYield, WorkoutResult};
pub use yield_solver::{
    DerivativeMethod, YieldResult, YieldSolver, DEFAULT_MAX_ITERATIONS,
    DEFAULT_TOLERANCE_FACTOR,
};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use bondcalc_core::daycounts::DayCountConvention;
use bondcalc_core::types::{CashFlowSchedule, Compounding, Date};

use crate::error::{BondError, BondResult};
use crate::types::BondTerms;

/// Converts a decimal quantity to `f64`.
///
/// # Errors
///
/// `BondError::InvalidTerms` naming `what` if `value` has no finite `f64`
/// representation.
pub fn decimal_to_f64(value: Decimal, what: &str) -> BondResult<f64> {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            BondError::invalid_terms(format!("{what} {value} is not representable as f64"))
        })
}

/// Conventions needed to discount a bond's cash flows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingContext {
    /// Date cash flows are discounted to.
    pub settlement: Date,
    /// Day count measuring time from settlement.
    pub day_count: DayCountConvention,
    /// Yield compounding convention.
    pub compounding: Compounding,
    /// Face value, scaling the solver tolerance.
    pub face_value: f64,
}

impl PricingContext {
    /// Builds the context for a bond settling on `settlement`.
    ///
    /// # Errors
    ///
    /// `BondError::InvalidTerms` if the face value does not convert to `f64`.
    pub fn for_terms(terms: &BondTerms, settlement: Date) -> BondResult<Self> {
        Ok(Self {
            settlement,
            day_count: terms.day_count,
            compounding: terms.compounding,
            face_value: decimal_to_f64(terms.face_value, "face value")?,
        })
    }
}

/// Future cash flows as `(years from settlement, amount)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountedFlows {
    times: Vec<f64>,
    amounts: Vec<f64>,
    compounding: Compounding,
}

impl DiscountedFlows {
    /// Converts the flows paid strictly after settlement.
    ///
    /// # Errors
    ///
    /// `BondError::InvalidTerms` if a year fraction or amount does not
    /// convert to `f64`.
    pub fn new(flows: &CashFlowSchedule, ctx: &PricingContext) -> BondResult<Self> {
        let mut times = Vec::with_capacity(flows.len());
        let mut amounts = Vec::with_capacity(flows.len());
        for cf in flows.iter().filter(|cf| cf.date() > ctx.settlement) {
            let years = ctx.day_count.year_fraction(ctx.settlement, cf.date());
            times.push(decimal_to_f64(years, "year fraction")?);
            amounts.push(decimal_to_f64(cf.amount(), "cash flow amount")?);
        }

        Ok(Self {
            times,
            amounts,
            compounding: ctx.compounding,
        })
    }

    /// Returns the year fractions from settlement.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the cash flow amounts.
    #[must_use]
    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    /// Returns the compounding convention.
    #[must_use]
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// Returns the number of flows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if no flows remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Present value of each flow at yield `y`, paired with its time.
    pub fn present_values(&self, y: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times
            .iter()
            .zip(&self.amounts)
            .map(move |(&t, &amount)| (t, amount * self.compounding.discount_factor(y, t)))
    }

    /// Dirty price at yield `y`.
    #[must_use]
    pub fn price(&self, y: f64) -> f64 {
        self.present_values(y).map(|(_, pv)| pv).sum()
    }

    /// Derivative of [`DiscountedFlows::price`] with respect to the yield.
    #[must_use]
    pub fn price_derivative(&self, y: f64) -> f64 {
        self.times
            .iter()
            .zip(&self.amounts)
            .map(|(&t, &amount)| amount * self.compounding.discount_factor_derivative(y, t))
            .sum()
    }

    /// Returns true if every discount factor is defined and positive at `y`.
    #[must_use]
    pub fn is_valid_yield(&self, y: f64) -> bool {
        self.times
            .iter()
            .all(|&t| self.compounding.is_valid_yield(y, t))
    }
}

/// Dirty price of the flows after settlement at yield `y`.
///
/// # Example
///
/// ```rust
/// use bondcalc_bonds::pricing::{price_from_yield, PricingContext};
/// use bondcalc_core::daycounts::DayCountConvention;
/// use bondcalc_core::types::{CashFlow, CashFlowSchedule, Compounding, Date};
/// use rust_decimal_macros::dec;
///
/// let settlement = Date::from_ymd(2025, 1, 1).unwrap();
/// let maturity = Date::from_ymd(2026, 1, 1).unwrap();
/// let flows: CashFlowSchedule =
///     vec![CashFlow::final_payment(maturity, dec!(0), dec!(100), settlement)].into_iter().collect();
/// let ctx = PricingContext {
///     settlement,
///     day_count: DayCountConvention::Act365Fixed,
///     compounding: Compounding::continuous(),
///     face_value: 100.0,
/// };
///
/// let price = price_from_yield(&flows, 0.05, &ctx).unwrap();
/// assert!((price - 100.0 * (-0.05_f64).exp()).abs() < 1e-12);
/// ```
///
/// # Errors
///
/// See [`DiscountedFlows::new`].
pub fn price_from_yield(flows: &CashFlowSchedule, y: f64, ctx: &PricingContext) -> BondResult<f64> {
    Ok(DiscountedFlows::new(flows, ctx)?.price(y))
}
