//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};

use super::Calendar;
use crate::error::{CoreError, CoreResult};
use crate::types::{normalize_token, Date};

/// Longest run of consecutive non-business days a roll will walk through.
const MAX_ROLL_DAYS: i64 = 366;

/// Business day adjustment conventions.
///
/// These conventions specify how to adjust a date that falls
/// on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum BusinessDayConvention {
    /// No adjustment - use the date as-is even if not a business day.
    Unadjusted,

    /// Move to the following business day.
    #[default]
    Following,

    /// Move to the following business day, unless it crosses a month boundary,
    /// in which case move to the preceding business day.
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,

    /// Move to the preceding business day, unless it crosses a month boundary,
    /// in which case move to the following business day.
    ModifiedPreceding,

    /// Like [`ModifiedFollowing`](Self::ModifiedFollowing), but also moves
    /// back when rolling forward would cross the middle of the month (the 15th).
    HalfMonthModifiedFollowing,

    /// Move to the nearest business day; ties go forward.
    Nearest,
}

impl BusinessDayConvention {
    /// Returns the upper-snake identifier of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            BusinessDayConvention::Unadjusted => "UNADJUSTED",
            BusinessDayConvention::Following => "FOLLOWING",
            BusinessDayConvention::ModifiedFollowing => "MODIFIED_FOLLOWING",
            BusinessDayConvention::Preceding => "PRECEDING",
            BusinessDayConvention::ModifiedPreceding => "MODIFIED_PRECEDING",
            BusinessDayConvention::HalfMonthModifiedFollowing => "HALF_MONTH_MODIFIED_FOLLOWING",
            BusinessDayConvention::Nearest => "NEAREST",
        }
    }
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::HalfMonthModifiedFollowing => "Half-Month Modified Following",
            BusinessDayConvention::Nearest => "Nearest",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for BusinessDayConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).replace('_', "").as_str() {
            "UNADJUSTED" | "NONE" => Ok(BusinessDayConvention::Unadjusted),
            "FOLLOWING" | "F" => Ok(BusinessDayConvention::Following),
            "MODIFIEDFOLLOWING" | "MF" => Ok(BusinessDayConvention::ModifiedFollowing),
            "PRECEDING" | "P" => Ok(BusinessDayConvention::Preceding),
            "MODIFIEDPRECEDING" | "MP" => Ok(BusinessDayConvention::ModifiedPreceding),
            "HALFMONTHMODIFIEDFOLLOWING" | "HMMF" => {
                Ok(BusinessDayConvention::HalfMonthModifiedFollowing)
            }
            "NEAREST" => Ok(BusinessDayConvention::Nearest),
            _ => Err(CoreError::config(format!(
                "unknown business day convention '{s}'"
            ))),
        }
    }
}

impl TryFrom<String> for BusinessDayConvention {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BusinessDayConvention> for String {
    fn from(value: BusinessDayConvention) -> Self {
        value.name().to_string()
    }
}

/// Adjusts a date according to the given business day convention.
///
/// # Errors
///
/// Returns `CoreError::InvalidDate` if no business day exists within a year
/// of `date` in the rolling direction.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> CoreResult<Date> {
    if calendar.is_business_day(date) {
        return Ok(date);
    }

    match convention {
        BusinessDayConvention::Unadjusted => Ok(date),

        BusinessDayConvention::Following => following(date, calendar),

        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar)?;
            if adjusted.month() == date.month() {
                Ok(adjusted)
            } else {
                preceding(date, calendar)
            }
        }

        BusinessDayConvention::Preceding => preceding(date, calendar),

        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = preceding(date, calendar)?;
            if adjusted.month() == date.month() {
                Ok(adjusted)
            } else {
                following(date, calendar)
            }
        }

        BusinessDayConvention::HalfMonthModifiedFollowing => {
            let adjusted = following(date, calendar)?;
            let crosses_month = adjusted.month() != date.month();
            let crosses_mid_month = date.day() <= 15 && adjusted.day() > 15;
            if crosses_month || crosses_mid_month {
                preceding(date, calendar)
            } else {
                Ok(adjusted)
            }
        }

        BusinessDayConvention::Nearest => {
            for step in 1..=MAX_ROLL_DAYS {
                let fwd = date.add_days(step);
                if calendar.is_business_day(fwd) {
                    return Ok(fwd);
                }
                let back = date.add_days(-step);
                if calendar.is_business_day(back) {
                    return Ok(back);
                }
            }
            Err(no_business_day(date))
        }
    }
}

/// Returns the next business day on or after the given date.
fn following<C: Calendar + ?Sized>(date: Date, calendar: &C) -> CoreResult<Date> {
    roll(date, 1, calendar)
}

/// Returns the previous business day on or before the given date.
fn preceding<C: Calendar + ?Sized>(date: Date, calendar: &C) -> CoreResult<Date> {
    roll(date, -1, calendar)
}

fn roll<C: Calendar + ?Sized>(date: Date, step: i64, calendar: &C) -> CoreResult<Date> {
    let mut current = date;
    for _ in 0..=MAX_ROLL_DAYS {
        if calendar.is_business_day(current) {
            return Ok(current);
        }
        current = current.add_days(step);
    }
    Err(no_business_day(date))
}

fn no_business_day(date: Date) -> CoreError {
    CoreError::invalid_date(format!("no business day within a year of {date}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{NullCalendar, WeekendCalendar};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_following_and_preceding() {
        let cal = WeekendCalendar;
        let saturday = date(2025, 1, 4);

        assert_eq!(
            adjust(saturday, BusinessDayConvention::Following, &cal).unwrap(),
            date(2025, 1, 6)
        );
        assert_eq!(
            adjust(saturday, BusinessDayConvention::Preceding, &cal).unwrap(),
            date(2025, 1, 3)
        );
    }

    #[test]
    fn test_modified_following_stays_in_month() {
        let cal = WeekendCalendar;

        // Saturday 2025-05-31: following is June 2, so roll back to Friday May 30
        let adjusted =
            adjust(date(2025, 5, 31), BusinessDayConvention::ModifiedFollowing, &cal).unwrap();
        assert_eq!(adjusted, date(2025, 5, 30));
    }

    #[test]
    fn test_modified_preceding_stays_in_month() {
        let cal = WeekendCalendar;

        // Saturday 2025-11-01: preceding is October 31, so roll forward to Monday Nov 3
        let adjusted =
            adjust(date(2025, 11, 1), BusinessDayConvention::ModifiedPreceding, &cal).unwrap();
        assert_eq!(adjusted, date(2025, 11, 3));
    }

    #[test]
    fn test_half_month_modified_following() {
        let cal = WeekendCalendar;

        // Saturday 2025-03-15: following is Monday 17th, crossing mid-month -> Friday 14th
        let adjusted = adjust(
            date(2025, 3, 15),
            BusinessDayConvention::HalfMonthModifiedFollowing,
            &cal,
        )
        .unwrap();
        assert_eq!(adjusted, date(2025, 3, 14));

        // Saturday 2025-03-08 rolls forward as usual
        let adjusted = adjust(
            date(2025, 3, 8),
            BusinessDayConvention::HalfMonthModifiedFollowing,
            &cal,
        )
        .unwrap();
        assert_eq!(adjusted, date(2025, 3, 10));
    }

    #[test]
    fn test_nearest() {
        let cal = WeekendCalendar;

        assert_eq!(
            adjust(date(2025, 1, 4), BusinessDayConvention::Nearest, &cal).unwrap(),
            date(2025, 1, 3)
        );
        assert_eq!(
            adjust(date(2025, 1, 5), BusinessDayConvention::Nearest, &cal).unwrap(),
            date(2025, 1, 6)
        );
    }

    #[test]
    fn test_unadjusted_and_business_day() {
        let cal = WeekendCalendar;
        let saturday = date(2025, 1, 4);
        let monday = date(2025, 1, 6);

        assert_eq!(
            adjust(saturday, BusinessDayConvention::Unadjusted, &cal).unwrap(),
            saturday
        );
        assert_eq!(
            adjust(monday, BusinessDayConvention::Following, &cal).unwrap(),
            monday
        );
        assert_eq!(
            adjust(saturday, BusinessDayConvention::Following, &NullCalendar).unwrap(),
            saturday
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "MODIFIED_FOLLOWING".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert_eq!(
            "Half Month Modified Following"
                .parse::<BusinessDayConvention>()
                .unwrap(),
            BusinessDayConvention::HalfMonthModifiedFollowing
        );
        assert!(matches!(
            "SIDEWAYS".parse::<BusinessDayConvention>(),
            Err(CoreError::ConfigError { .. })
        ));
    }
}
