//! Flat discount curve implied by a solved yield.
//!
//! The bond's yield, applied with its own compounding convention and day
//! count, is read as a flat term structure and sampled on each forward
//! payment date.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use bondcalc_bonds::pricing::{decimal_to_f64, PricingContext};
use bondcalc_core::types::{CashFlowSchedule, Date};

use crate::error::EngineResult;

/// One sampled point of a discount curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Payment date.
    pub date: Date,
    /// Years from settlement.
    pub time: f64,
    /// Discount factor from the payment date back to settlement.
    pub discount_factor: f64,
    /// Zero rate under the bond's compounding convention.
    pub zero_rate: f64,
}

/// Samples the flat curve at yield `y` on every payment after settlement.
///
/// # Example
///
/// ```rust
/// use bondcalc_analytics::curve::flat_discount_curve;
/// use bondcalc_bonds::pricing::PricingContext;
/// use bondcalc_core::daycounts::DayCountConvention;
/// use bondcalc_core::types::{CashFlow, CashFlowSchedule, Compounding, Date};
/// use rust_decimal_macros::dec;
///
/// let settlement = Date::from_ymd(2025, 1, 1).unwrap();
/// let flows: CashFlowSchedule = vec![CashFlow::final_payment(
///     Date::from_ymd(2026, 1, 1).unwrap(),
///     dec!(0),
///     dec!(100),
///     settlement,
/// )]
/// .into_iter()
/// .collect();
/// let ctx = PricingContext {
///     settlement,
///     day_count: DayCountConvention::Act365Fixed,
///     compounding: Compounding::continuous(),
///     face_value: 100.0,
/// };
///
/// let curve = flat_discount_curve(&flows, &ctx, 0.05).unwrap();
/// assert!((curve[0].discount_factor - (-0.05_f64).exp()).abs() < 1e-15);
/// ```
pub fn flat_discount_curve(
    flows: &CashFlowSchedule,
    ctx: &PricingContext,
    y: f64,
) -> EngineResult<Vec<CurvePoint>> {
    flows
        .iter()
        .filter(|cf| cf.date() > ctx.settlement)
        .map(|cf| {
            let time = decimal_to_f64(
                ctx.day_count.year_fraction(ctx.settlement, cf.date()),
                "year fraction",
            )?;
            let discount_factor = ctx.compounding.discount_factor(y, time);
            Ok(CurvePoint {
                date: cf.date(),
                time,
                discount_factor,
                zero_rate: ctx.compounding.zero_rate(discount_factor, time),
            })
        })
        .collect()
}

/// Serializes curve points as `{date, time, discount_factor, zero_rate}` rows.
pub(crate) fn curve_to_json(points: &[CurvePoint]) -> Value {
    points
        .iter()
        .map(|p| {
            json!({
                "date": p.date,
                "time": p.time,
                "discount_factor": p.discount_factor,
                "zero_rate": p.zero_rate,
            })
        })
        .collect()
}
