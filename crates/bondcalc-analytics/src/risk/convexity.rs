//! Analytical convexity.

use bondcalc_bonds::pricing::DiscountedFlows;

use crate::error::{EngineError, EngineResult};

/// Convexity from present-value weighted times.
///
/// ```text
/// C = Σ(t_i × (t_i + 1/f) × PV(CF_i)) / (P × (1 + y/f)²)
/// ```
pub fn analytical_convexity(flows: &DiscountedFlows, ytm: f64, frequency: u32) -> EngineResult<f64> {
    if flows.is_empty() {
        return Err(EngineError::risk_calculation("no cash flows provided"));
    }

    let freq = f64::from(frequency);
    let (weighted_sum, price) = flows.present_values(ytm).fold(
        (0.0, 0.0),
        |(weighted, total), (t, pv)| (weighted + t * (t + 1.0 / freq) * pv, total + pv),
    );

    if !price.is_finite() || price.abs() < 1e-10 {
        return Err(EngineError::risk_calculation(
            "price is zero in convexity calculation",
        ));
    }

    Ok(weighted_sum / (price * (1.0 + ytm / freq).powi(2)))
}

/// Second-order price change from modified duration and convexity.
pub fn price_change_with_convexity(
    modified: f64,
    convexity: f64,
    price: f64,
    yield_change: f64,
) -> f64 {
    -modified * price * yield_change + 0.5 * convexity * price * yield_change.powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondcalc_bonds::pricing::PricingContext;
    use bondcalc_core::daycounts::DayCountConvention;
    use bondcalc_core::types::{CashFlow, CashFlowSchedule, Compounding, Date, Frequency};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_zero_coupon_closed_form() {
        // 5-year zero, annual: t (t + 1) / (1 + y)²
        let settlement = date(2025, 1, 1);
        let flows: CashFlowSchedule = vec![CashFlow::final_payment(
            date(2030, 1, 1),
            dec!(0),
            dec!(100),
            settlement,
        )]
        .into_iter()
        .collect();
        let ctx = PricingContext {
            settlement,
            day_count: DayCountConvention::Thirty360US,
            compounding: Compounding::compounded(Frequency::Annual),
            face_value: 100.0,
        };
        let flows = DiscountedFlows::new(&flows, &ctx).unwrap();

        let conv = analytical_convexity(&flows, 0.05, 1).unwrap();
        assert_relative_eq!(conv, 30.0 / 1.1025, epsilon = 1e-10);
    }

    #[test]
    fn test_convexity_improves_estimate() {
        let modified = 7.5;
        let convexity = 70.0;
        let linear = price_change_with_convexity(modified, 0.0, 100.0, 0.01);
        let curved = price_change_with_convexity(modified, convexity, 100.0, 0.01);
        assert_relative_eq!(linear, -7.5);
        assert_relative_eq!(curved - linear, 0.35, epsilon = 1e-12);
    }
}
