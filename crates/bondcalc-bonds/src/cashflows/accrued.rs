//! Accrued interest.

use rust_decimal::Decimal;

use bondcalc_core::daycounts::DayCountConvention;
use bondcalc_core::types::{CashFlowSchedule, Date};

/// Coupon accrued from the start of the current period to settlement.
///
/// The current period is the one paid by the first cash flow strictly after
/// settlement. When settlement falls exactly on a coupon date that coupon
/// counts as paid, the next period starts on settlement, and nothing has
/// accrued yet.
///
/// ```text
/// AI = period coupon × days(start, settlement) / days(start, end)
/// ```
#[must_use]
pub fn accrued_interest(
    flows: &CashFlowSchedule,
    settlement: Date,
    day_count: DayCountConvention,
) -> Decimal {
    let Some(current) = flows.iter().find(|cf| cf.date() > settlement) else {
        return Decimal::ZERO;
    };

    let start = current.accrual_start();
    if settlement <= start {
        return Decimal::ZERO;
    }

    let accrued_days = day_count.day_count(start, settlement);
    let period_days = day_count.day_count(start, current.accrual_end());
    if period_days <= 0 {
        return Decimal::ZERO;
    }

    current.coupon_amount() * Decimal::from(accrued_days) / Decimal::from(period_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondcalc_core::types::CashFlow;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn flows() -> CashFlowSchedule {
        vec![
            CashFlow::coupon(date(2025, 7, 15), dec!(25), date(2025, 1, 15)),
            CashFlow::final_payment(date(2026, 1, 15), dec!(25), dec!(1000), date(2025, 7, 15)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_mid_period_thirty360() {
        // 2025-01-15 to 2025-04-15 is 90 of 180 days
        let ai = accrued_interest(&flows(), date(2025, 4, 15), DayCountConvention::Thirty360US);
        assert_eq!(ai, dec!(12.5));
    }

    #[test]
    fn test_actual_days() {
        // 31 of 181 actual days
        let ai = accrued_interest(&flows(), date(2025, 2, 15), DayCountConvention::Act365Fixed);
        assert_eq!(ai, dec!(25) * dec!(31) / dec!(181));
    }

    #[test]
    fn test_settlement_on_coupon_date() {
        let ai = accrued_interest(&flows(), date(2025, 7, 15), DayCountConvention::Act360);
        assert_eq!(ai, Decimal::ZERO);
    }

    #[test]
    fn test_zero_coupon_accrues_nothing() {
        let zero: CashFlowSchedule = vec![CashFlow::final_payment(
            date(2030, 1, 15),
            Decimal::ZERO,
            dec!(1000),
            date(2025, 1, 15),
        )]
        .into_iter()
        .collect();
        let ai = accrued_interest(&zero, date(2027, 6, 1), DayCountConvention::ActActIsda);
        assert_eq!(ai, Decimal::ZERO);
    }

    #[test]
    fn test_after_last_payment() {
        let ai = accrued_interest(&flows(), date(2026, 2, 1), DayCountConvention::Act365Fixed);
        assert_eq!(ai, Decimal::ZERO);
    }
}
