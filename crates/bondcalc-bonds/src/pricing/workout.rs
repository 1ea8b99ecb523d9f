//! Yield to worst over an exercise schedule.

use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;

use bondcalc_core::types::{CashFlowSchedule, Date};

use super::{PricingContext, YieldSolver};
use crate::cashflows::truncate_at_exercise;
use crate::error::{BondError, BondResult};
use crate::types::ExerciseEntry;

/// Yield assuming exercise on one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExerciseYield {
    /// Exercise date.
    pub date: Date,
    /// Exercise price.
    pub strike: Decimal,
    /// Yield to this exercise.
    #[serde(rename = "yield")]
    pub yield_value: f64,
}

/// The lowest yield across exercise dates and maturity.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutResult {
    /// Minimum yield.
    pub yield_to_worst: f64,
    /// Redemption date achieving the minimum.
    pub workout_date: Date,
    /// Yield to each eligible exercise date, in date order.
    pub exercise_yields: Vec<ExerciseYield>,
    /// Cash flows to the workout date.
    pub workout_flows: CashFlowSchedule,
}

impl WorkoutResult {
    /// Returns true if the worst case is an early exercise.
    #[must_use]
    pub fn is_exercised(&self) -> bool {
        self.workout_flows
            .last()
            .is_some_and(|cf| self.exercise_yields.iter().any(|e| e.date == cf.date()))
    }
}

/// Computes yield to worst.
///
/// Every exercise date strictly between settlement and maturity is a
/// candidate, solved on the flows truncated at that date against the same
/// dirty price; maturity is the final candidate at `yield_to_maturity`.
/// Candidates are scanned in date order and a later one replaces the
/// current worst only when strictly lower, so ties go to the earlier date.
///
/// # Errors
///
/// - `BondError::InvalidTerms` if `flows` is empty
/// - any solver error for an exercise candidate
pub fn yield_to_worst(
    solver: &YieldSolver,
    flows: &CashFlowSchedule,
    exercises: &[ExerciseEntry],
    dirty_price: f64,
    yield_to_maturity: f64,
    ctx: &PricingContext,
) -> BondResult<WorkoutResult> {
    let maturity = flows
        .last()
        .map(|cf| cf.date())
        .ok_or_else(|| BondError::invalid_terms("No future cash flows"))?;

    let mut exercise_yields = Vec::with_capacity(exercises.len());
    let mut worst: Option<(f64, Date, CashFlowSchedule)> = None;

    for exercise in exercises
        .iter()
        .filter(|e| e.date > ctx.settlement && e.date < maturity)
    {
        let truncated = truncate_at_exercise(flows, exercise, ctx.day_count);
        let result = solver.solve(&truncated, dirty_price, ctx, yield_to_maturity)?;

        exercise_yields.push(ExerciseYield {
            date: exercise.date,
            strike: exercise.price,
            yield_value: result.yield_value,
        });

        if worst.as_ref().map_or(true, |(y, _, _)| result.yield_value < *y) {
            worst = Some((result.yield_value, exercise.date, truncated));
        }
    }

    let (yield_to_worst, workout_date, workout_flows) = match worst {
        Some((y, date, truncated)) if y <= yield_to_maturity => (y, date, truncated),
        _ => (yield_to_maturity, maturity, flows.clone()),
    };

    debug!(
        "yield to worst {:.8} at {} across {} exercise dates",
        yield_to_worst,
        workout_date,
        exercise_yields.len()
    );

    Ok(WorkoutResult {
        yield_to_worst,
        workout_date,
        exercise_yields,
        workout_flows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondcalc_core::daycounts::DayCountConvention;
    use bondcalc_core::types::{CashFlow, Compounding};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn ctx() -> PricingContext {
        PricingContext {
            settlement: date(2025, 1, 15),
            day_count: DayCountConvention::Thirty360US,
            compounding: Compounding::default(),
            face_value: 1000.0,
        }
    }

    /// Four-year 6% semiannual bond.
    fn flows() -> CashFlowSchedule {
        let mut schedule = CashFlowSchedule::new();
        let mut start = date(2025, 1, 15);
        for i in 1..=8 {
            let end = date(2025, 1, 15).add_months(6 * i).unwrap();
            if i == 8 {
                schedule.push(CashFlow::final_payment(end, dec!(30), dec!(1000), start));
            } else {
                schedule.push(CashFlow::coupon(end, dec!(30), start));
            }
            start = end;
        }
        schedule
    }

    fn ytm(price: f64) -> f64 {
        YieldSolver::new().solve(&flows(), price, &ctx(), 0.05).unwrap().yield_value
    }

    #[test]
    fn test_premium_bond_called_at_first_date() {
        let calls = [
            ExerciseEntry::new(date(2026, 1, 15), dec!(1000)),
            ExerciseEntry::new(date(2027, 1, 15), dec!(1000)),
        ];
        let price = 1080.0;
        let ytm = ytm(price);

        let result =
            yield_to_worst(&YieldSolver::new(), &flows(), &calls, price, ytm, &ctx()).unwrap();

        assert_eq!(result.exercise_yields.len(), 2);
        assert_eq!(result.workout_date, date(2026, 1, 15));
        assert!(result.yield_to_worst < ytm);
        assert_relative_eq!(result.yield_to_worst, result.exercise_yields[0].yield_value);
        assert!(result.is_exercised());
        assert_eq!(result.workout_flows.len(), 2);
    }

    #[test]
    fn test_discount_bond_works_out_to_maturity() {
        let calls = [ExerciseEntry::new(date(2026, 1, 15), dec!(1000))];
        let price = 920.0;
        let ytm = ytm(price);

        let result =
            yield_to_worst(&YieldSolver::new(), &flows(), &calls, price, ytm, &ctx()).unwrap();

        assert_eq!(result.workout_date, date(2029, 1, 15));
        assert_relative_eq!(result.yield_to_worst, ytm);
        assert!(!result.is_exercised());
    }

    #[test]
    fn test_past_and_maturity_dates_skipped() {
        let calls = [
            ExerciseEntry::new(date(2024, 7, 15), dec!(1000)),
            ExerciseEntry::new(date(2025, 1, 15), dec!(1000)),
            ExerciseEntry::new(date(2029, 1, 15), dec!(1000)),
        ];
        let ytm = ytm(1000.0);

        let result =
            yield_to_worst(&YieldSolver::new(), &flows(), &calls, 1000.0, ytm, &ctx()).unwrap();

        assert!(result.exercise_yields.is_empty());
        assert_eq!(result.workout_date, date(2029, 1, 15));
    }

    #[test]
    fn test_par_bond_yields_coupon_everywhere() {
        // Redeeming at par on a coupon date reprices a par bond at the coupon rate
        let calls = [
            ExerciseEntry::new(date(2026, 1, 15), dec!(1000)),
            ExerciseEntry::new(date(2027, 1, 15), dec!(1000)),
        ];
        let ytm = ytm(1000.0);

        let result =
            yield_to_worst(&YieldSolver::new(), &flows(), &calls, 1000.0, ytm, &ctx()).unwrap();

        assert_relative_eq!(ytm, 0.06, epsilon = 1e-7);
        assert_relative_eq!(result.yield_to_worst, 0.06, epsilon = 1e-7);
        for exercise in &result.exercise_yields {
            assert_relative_eq!(exercise.yield_value, 0.06, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_serializes_yield_key() {
        let entry = ExerciseYield {
            date: date(2026, 1, 15),
            strike: dec!(1000),
            yield_value: 0.05,
        };
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json["yield"], 0.05);
        assert_eq!(json["date"], "2026-01-15");
    }
}
