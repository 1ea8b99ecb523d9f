//! 30/360 day count conventions.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

#[inline]
fn is_last_day_of_february(date: Date) -> bool {
    date.month() == 2 && date.is_end_of_month()
}

#[inline]
fn thirty360_days(start: Date, end: Date, d1: i64, d2: i64) -> i64 {
    let years = i64::from(end.year()) - i64::from(start.year());
    let months = i64::from(end.month()) - i64::from(start.month());
    360 * years + 30 * months + (d2 - d1)
}

/// 30/360 US day count convention (Bond Basis).
///
/// # Rules
///
/// 1. If D1 is the last day of February, change D1 to 30
/// 2. If D1 is 31, change D1 to 30
/// 3. If D2 is the last day of February AND D1 was last day of February, change D2 to 30
/// 4. If D2 is 31 AND D1 is now >= 30, change D2 to 30
///
/// # Formula
///
/// $$\text{Days} = 360 \times (Y_2 - Y_1) + 30 \times (M_2 - M_1) + (D_2 - D_1)$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360US;

impl DayCount for Thirty360US {
    fn name(&self) -> &'static str {
        "30/360 US"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = i64::from(start.day());
        let mut d2 = i64::from(end.day());

        let d1_was_feb_eom = is_last_day_of_february(start);
        if d1_was_feb_eom || d1 == 31 {
            d1 = 30;
        }

        if (d1_was_feb_eom && is_last_day_of_february(end)) || (d2 == 31 && d1 >= 30) {
            d2 = 30;
        }

        thirty360_days(start, end, d1, d2)
    }
}

/// 30E/360 day count convention (Eurobond Basis).
///
/// Day 31 becomes 30 on either end; February gets no special handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = i64::from(start.day().min(30));
        let d2 = i64::from(end.day().min(30));
        thirty360_days(start, end, d1, d2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_us_end_of_month_31st() {
        // D1=31 -> 30, D2=31 with D1>=30 -> 30
        assert_eq!(Thirty360US.day_count(date(2025, 1, 31), date(2025, 3, 31)), 60);
        // D2=31 with D1<30 stays 31
        assert_eq!(Thirty360US.day_count(date(2025, 1, 15), date(2025, 3, 31)), 76);
    }

    #[test]
    fn test_us_february_end_of_month() {
        // Feb EOM to Feb EOM is a whole year
        assert_eq!(Thirty360US.day_count(date(2024, 2, 29), date(2025, 2, 28)), 360);
        // Feb EOM start becomes 30
        assert_eq!(Thirty360US.day_count(date(2025, 2, 28), date(2025, 3, 31)), 30);
    }

    #[test]
    fn test_eurobond_has_no_february_rule() {
        assert_eq!(Thirty360E.day_count(date(2025, 2, 28), date(2025, 3, 31)), 32);
        assert_eq!(Thirty360E.day_count(date(2025, 1, 15), date(2025, 3, 31)), 75);
    }

    #[test]
    fn test_half_year_fraction() {
        let yf = Thirty360US.year_fraction(date(2025, 3, 15), date(2025, 9, 15));
        assert_eq!(yf, Decimal::new(5, 1));
    }
}
