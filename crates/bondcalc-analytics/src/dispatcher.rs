//! Bond analytics dispatcher.
//!
//! One pass per (bond, analytics date):
//!
//! 1. validate the terms and resolve settlement
//! 2. generate the forward cash flows for the variant
//! 3. accrued interest, then price and yield from the market price (or the
//!    quoted yield)
//! 4. yield to worst for bonds with an exercise schedule
//! 5. risk metrics, the flat discount curve at the solved yield and the
//!    summary mapping

use std::collections::BTreeMap;

use log::debug;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{json, Value};

use bondcalc_bonds::cashflows::{accrued_interest, resolve_settlement, CashFlowGenerator};
use bondcalc_bonds::pricing::{
    decimal_to_f64, yield_to_worst, DiscountedFlows, PricingContext, WorkoutResult,
};
use bondcalc_bonds::types::{BondTerms, BondVariant, Validate};
use bondcalc_bonds::BondError;
use bondcalc_core::types::{CashFlowSchedule, Date};

use crate::config::EngineConfig;
use crate::curve::{curve_to_json, flat_discount_curve, CurvePoint};
use crate::error::EngineResult;
use crate::result::{cashflows_to_json, AnalyticsResult};
use crate::risk::RiskMetrics;

/// Computes analytics with the default configuration.
///
/// # Example
///
/// ```rust
/// use bondcalc_analytics::compute_analytics;
/// use bondcalc_bonds::prelude::*;
/// use bondcalc_core::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let issue = Date::from_ymd(2025, 1, 15).unwrap();
/// let terms = BondTerms::new(
///     "UST-5Y",
///     BondVariant::fixed(dec!(0.04), Frequency::SemiAnnual),
///     dec!(1000),
///     issue,
///     Date::from_ymd(2030, 1, 15).unwrap(),
/// )
/// .with_settlement_date(issue)
/// .with_market_price(dec!(1000));
///
/// let result = compute_analytics(&terms, issue).unwrap();
/// assert!(result.yield_to_maturity > 0.039 && result.yield_to_maturity < 0.041);
/// assert!(result.yield_to_worst.is_none());
/// ```
pub fn compute_analytics(terms: &BondTerms, analytics_date: Date) -> EngineResult<AnalyticsResult> {
    AnalyticsEngine::new().compute(terms, analytics_date)
}

/// Analytics entry point carrying a validated configuration.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: EngineConfig,
}

/// Price and yield established for the forward flows.
struct Valuation {
    dirty_price: f64,
    yield_to_maturity: f64,
    iterations: u32,
}

impl AnalyticsEngine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine after validating `config`.
    pub fn with_config(config: EngineConfig) -> EngineResult<Self> {
        config.check()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parses bond terms, applying the configured settlement lag when the
    /// document does not give one.
    pub fn terms_from_json(&self, json: &str) -> EngineResult<BondTerms> {
        let mut terms = BondTerms::from_json(json)?;
        let has_lag = serde_json::from_str::<Value>(json)
            .ok()
            .is_some_and(|v| v.get("settlement_days").is_some());
        if !has_lag {
            terms.settlement_days = self.config.default_settlement_days;
        }
        Ok(terms)
    }

    /// Computes analytics for one bond on one date.
    ///
    /// # Errors
    ///
    /// Any [`crate::EngineError`]; no partial result is returned.
    pub fn compute(&self, terms: &BondTerms, analytics_date: Date) -> EngineResult<AnalyticsResult> {
        debug!(
            "computing analytics for {} ({}) as of {}",
            terms.bond_id,
            terms.kind(),
            analytics_date
        );

        terms.validate_or_error()?;
        let settlement = resolve_settlement(terms, analytics_date)?;
        let flows = CashFlowGenerator::generate(terms, settlement)?;
        if flows.is_empty() {
            return Err(BondError::invalid_terms("No future cash flows").into());
        }

        let accrued = decimal_to_f64(
            accrued_interest(&flows, settlement, terms.day_count),
            "accrued interest",
        )?;
        let ctx = PricingContext::for_terms(terms, settlement)?;
        let discounted = DiscountedFlows::new(&flows, &ctx)?;

        let valuation = self.value(terms, &discounted, &ctx, accrued)?;
        let clean_price = valuation.dirty_price - accrued;

        let workout = match terms.variant.exercise_schedule() {
            Some(exercises) => Some(yield_to_worst(
                &self.config.solver(),
                &flows,
                exercises,
                valuation.dirty_price,
                valuation.yield_to_maturity,
                &ctx,
            )?),
            None => None,
        };

        let frequency = terms.risk_frequency().periods_per_year();
        let risk = match &workout {
            Some(w) => RiskMetrics::compute(
                &discounted,
                &DiscountedFlows::new(&w.workout_flows, &ctx)?,
                valuation.yield_to_maturity,
                w.yield_to_worst,
                frequency,
                self.config.bump_size,
            )?,
            None => RiskMetrics::compute(
                &discounted,
                &discounted,
                valuation.yield_to_maturity,
                valuation.yield_to_maturity,
                frequency,
                self.config.bump_size,
            )?,
        };

        let curve = flat_discount_curve(&flows, &ctx, valuation.yield_to_maturity)?;
        let summary = build_summary(
            terms,
            settlement,
            &flows,
            &curve,
            clean_price,
            valuation.iterations,
            workout.as_ref(),
        )?;

        debug!(
            "{}: ytm {:.8}, clean {:.6}, modified duration {:.6}",
            terms.bond_id, valuation.yield_to_maturity, clean_price, risk.modified_duration
        );

        Ok(AnalyticsResult {
            bond_id: terms.bond_id.clone(),
            analytics_date,
            settlement_date: settlement,
            clean_price,
            dirty_price: valuation.dirty_price,
            accrued_interest: accrued,
            yield_to_maturity: valuation.yield_to_maturity,
            yield_to_worst: workout.map(|w| w.yield_to_worst),
            modified_duration: risk.modified_duration,
            macaulay_duration: risk.macaulay_duration,
            simple_duration: risk.simple_duration,
            convexity: risk.convexity,
            dv01: risk.dv01,
            summary,
        })
    }

    /// Computes analytics for many bonds, in parallel when the `parallel`
    /// feature is enabled.
    pub fn compute_batch(
        &self,
        bonds: &[BondTerms],
        analytics_date: Date,
    ) -> Vec<EngineResult<AnalyticsResult>> {
        crate::batch::map_bonds(bonds, |terms| self.compute(terms, analytics_date))
    }

    /// Establishes the dirty price and yield. A market price wins over a
    /// quoted yield.
    fn value(
        &self,
        terms: &BondTerms,
        flows: &DiscountedFlows,
        ctx: &PricingContext,
        accrued: f64,
    ) -> EngineResult<Valuation> {
        if let Some(clean) = terms.market_price {
            let dirty_price = decimal_to_f64(clean, "market price")? + accrued;
            let solved = self.config.solver().yield_from_price(
                flows,
                dirty_price,
                ctx.face_value,
                self.initial_guess(terms),
            )?;
            return Ok(Valuation {
                dirty_price,
                yield_to_maturity: solved.yield_value,
                iterations: solved.iterations,
            });
        }

        let ytm = terms.quoted_yield.ok_or(BondError::MissingYield)?;
        if !flows.is_valid_yield(ytm) {
            return Err(BondError::invalid_yield_domain(format!(
                "quoted yield {ytm} gives a non-positive discount factor"
            ))
            .into());
        }
        Ok(Valuation {
            dirty_price: flows.price(ytm),
            yield_to_maturity: ytm,
            iterations: 0,
        })
    }

    /// The coupon rate when positive, else the configured guess.
    fn initial_guess(&self, terms: &BondTerms) -> f64 {
        terms
            .variant
            .coupon_rate()
            .and_then(|r| r.to_f64())
            .filter(|r| *r > 0.0)
            .unwrap_or(self.config.initial_guess)
    }
}

fn build_summary(
    terms: &BondTerms,
    settlement: Date,
    flows: &CashFlowSchedule,
    curve: &[CurvePoint],
    clean_price: f64,
    iterations: u32,
    workout: Option<&WorkoutResult>,
) -> EngineResult<BTreeMap<String, Value>> {
    let face = decimal_to_f64(terms.face_value, "face value")?;
    let normalized_price = if face > 0.0 {
        clean_price / face * 100.0
    } else {
        0.0
    };
    let current_yield = annual_coupon(terms, flows)
        .filter(|_| clean_price > 0.0)
        .map(|coupon| coupon / clean_price);

    let mut summary = BTreeMap::new();
    summary.insert("bond_type".to_string(), json!(terms.kind().name()));
    summary.insert("settlement_date".to_string(), json!(settlement.to_string()));
    summary.insert("normalized_price".to_string(), json!(normalized_price));
    summary.insert("current_yield".to_string(), json!(current_yield));
    summary.insert("cashflows".to_string(), cashflows_to_json(flows));
    summary.insert("discount_curve".to_string(), curve_to_json(curve));
    summary.insert("solver_iterations".to_string(), json!(iterations));

    if let Some(w) = workout {
        let exercise_yields: Vec<Value> = w
            .exercise_yields
            .iter()
            .map(|e| {
                json!({
                    "date": e.date.to_string(),
                    "strike": e.strike.to_f64(),
                    "yield": e.yield_value,
                })
            })
            .collect();
        summary.insert("exercise_yields".to_string(), Value::Array(exercise_yields));
        summary.insert("workout_date".to_string(), json!(w.workout_date.to_string()));
    }

    Ok(summary)
}

/// Annual coupon income: rate × face for fixed coupons, the current period's
/// coupon annualized for floaters, none for zero-coupon bonds.
fn annual_coupon(terms: &BondTerms, flows: &CashFlowSchedule) -> Option<f64> {
    match &terms.variant {
        BondVariant::ZeroCoupon => None,
        BondVariant::Floating { frequency, .. } => flows
            .as_slice()
            .first()
            .and_then(|cf| cf.coupon_amount().to_f64())
            .map(|coupon| coupon * f64::from(frequency.periods_per_year())),
        variant => variant
            .coupon_rate()
            .map(|rate| rate * terms.face_value)
            .and_then(|coupon| coupon.to_f64()),
    }
}
