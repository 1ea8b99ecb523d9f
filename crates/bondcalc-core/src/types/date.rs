//! Calendar dates.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A calendar date without time or zone.
///
/// Wraps `chrono::NaiveDate` and adds the month arithmetic coupon schedules
/// need. Serializes as `YYYY-MM-DD`.
///
/// # Example
///
/// ```rust
/// use bondcalc_core::types::Date;
///
/// let date = Date::from_ymd(2025, 8, 31).unwrap();
/// let next = date.add_months(6).unwrap();
/// assert_eq!(next, Date::from_ymd(2026, 2, 28).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Builds a date from its components.
    ///
    /// # Errors
    ///
    /// `CoreError::InvalidDate` when the components do not name a real day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// `CoreError::InvalidDate` on any other format.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month, 1 to 12.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month, 1 to 31.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Length of this date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        month_length(self.year(), self.month())
    }

    /// 365 or 366.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        if self.0.leap_year() {
            366
        } else {
            365
        }
    }

    /// Shifts by calendar days; negative moves backward.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Shifts by whole months, clamping the day to the target month's length.
    ///
    /// # Errors
    ///
    /// `CoreError::InvalidDate` when the result leaves chrono's range.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let index = self.year() * 12 + self.month() as i32 - 1 + months;
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) as u32 + 1;
        Self::from_ymd(year, month, self.day().min(month_length(year, month)))
    }

    /// Signed calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// The wrapped chrono date.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// True on the last day of the month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// True on Saturday and Sunday.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn month_length(year: i32, month: u32) -> u32 {
    match month {
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_components() {
        let d = date(2025, 6, 15);
        assert_eq!((d.year(), d.month(), d.day()), (2025, 6, 15));
        assert!(Date::from_ymd(2025, 2, 30).is_err());
        assert!(Date::from_ymd(2025, 13, 1).is_err());
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(date(2025, 1, 31).add_months(1).unwrap(), date(2025, 2, 28));
        assert_eq!(date(2023, 8, 31).add_months(6).unwrap(), date(2024, 2, 29));
        assert_eq!(date(2024, 1, 15).add_months(-6).unwrap(), date(2023, 7, 15));
        assert_eq!(date(2024, 1, 15).add_months(-13).unwrap(), date(2022, 12, 15));
    }

    #[test]
    fn test_year_and_month_lengths() {
        assert_eq!(date(2024, 3, 1).days_in_year(), 366);
        assert_eq!(date(2100, 3, 1).days_in_year(), 365);
        assert_eq!(date(2000, 2, 1).days_in_month(), 29);
        assert!(date(2024, 2, 29).is_end_of_month());
        assert!(!date(2025, 2, 27).is_end_of_month());
    }

    #[test]
    fn test_days_between_is_signed() {
        let a = date(2025, 1, 1);
        let b = date(2025, 1, 31);
        assert_eq!(a.days_between(&b), 30);
        assert_eq!(b.days_between(&a), -30);
        assert_eq!(a.add_days(30), b);
    }

    #[test]
    fn test_weekend() {
        assert!(date(2025, 1, 4).is_weekend());
        assert_eq!(date(2025, 1, 6).weekday(), Weekday::Mon);
    }

    #[test]
    fn test_text_forms() {
        let d: Date = " 2025-06-05".parse().unwrap();
        assert_eq!(d.to_string(), "2025-06-05");
        assert!(Date::parse("05/06/2025").is_err());
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2025-06-05\"");
        assert_eq!(serde_json::from_str::<Date>("\"2025-06-05\"").unwrap(), d);
    }
}
