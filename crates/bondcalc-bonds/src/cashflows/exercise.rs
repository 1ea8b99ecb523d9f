//! Cash flows to an early exercise date.

use rust_decimal::Decimal;

use bondcalc_core::daycounts::DayCountConvention;
use bondcalc_core::types::{CashFlow, CashFlowSchedule};

use crate::types::ExerciseEntry;

/// Truncates a schedule at an exercise date.
///
/// Cash flows before the exercise date are kept. The flow of the period
/// containing the exercise date is replaced by a redemption paying the
/// exercise price plus the coupon accrued to the exercise date (the full
/// coupon when the exercise date is a coupon date).
#[must_use]
pub fn truncate_at_exercise(
    flows: &CashFlowSchedule,
    exercise: &ExerciseEntry,
    day_count: DayCountConvention,
) -> CashFlowSchedule {
    let mut truncated = CashFlowSchedule::with_capacity(flows.len());

    for cf in flows {
        if cf.date() < exercise.date {
            truncated.push(*cf);
            continue;
        }

        let coupon = if cf.date() == exercise.date {
            cf.coupon_amount()
        } else {
            coupon_to(cf, exercise, day_count)
        };
        truncated.push(CashFlow::redemption(
            exercise.date,
            coupon,
            exercise.price,
            cf.accrual_start(),
        ));
        break;
    }

    truncated
}

fn coupon_to(cf: &CashFlow, exercise: &ExerciseEntry, day_count: DayCountConvention) -> Decimal {
    let start = cf.accrual_start();
    if exercise.date <= start {
        return Decimal::ZERO;
    }
    let period_days = day_count.day_count(start, cf.accrual_end());
    if period_days <= 0 {
        return Decimal::ZERO;
    }
    cf.coupon_amount() * Decimal::from(day_count.day_count(start, exercise.date))
        / Decimal::from(period_days)
}
