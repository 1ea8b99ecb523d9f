//! Actual/Actual ISDA day count convention.

use chrono::Datelike;
use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/Actual ISDA day count convention.
///
/// The period is split at each January 1st; days falling in a leap year
/// count 1/366 and the rest 1/365.
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Days in non-leap years}}{365} + \frac{\text{Days in leap years}}{366}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl ActActIsda {
    fn forward_fraction(start: Date, end: Date) -> Decimal {
        let mut total = Decimal::ZERO;
        let mut current = start;

        while current.year() < end.year() {
            let days_in_year = current.days_in_year();
            // Days from `current` up to and including Dec 31
            let days = i64::from(days_in_year - current.as_naive_date().ordinal() + 1);
            total += Decimal::from(days) / Decimal::from(days_in_year);
            current = current.add_days(days);
        }

        if current < end {
            let days = current.days_between(&end);
            total += Decimal::from(days) / Decimal::from(current.days_in_year());
        }

        total
    }
}

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        match start.cmp(&end) {
            std::cmp::Ordering::Equal => Decimal::ZERO,
            std::cmp::Ordering::Less => Self::forward_fraction(start, end),
            std::cmp::Ordering::Greater => -Self::forward_fraction(end, start),
        }
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
