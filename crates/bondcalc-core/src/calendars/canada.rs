//! Canadian settlement calendar.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::sync::OnceLock;

use super::bitmap::{HolidayCalendarBuilder, MarketCalendar, MAX_YEAR};
use super::uk::christmas;

static CANADA: OnceLock<MarketCalendar> = OnceLock::new();

/// Canada settlement calendar.
///
/// ## Holidays
///
/// - New Year's Day (moved to Monday if weekend)
/// - Family Day (3rd Monday in February, since 2008)
/// - Good Friday
/// - Victoria Day (Monday on or before May 24)
/// - Canada Day (July 1, moved to Monday if weekend)
/// - Civic Holiday (1st Monday in August)
/// - Labour Day (1st Monday in September)
/// - National Day for Truth and Reconciliation (September 30, since 2021)
/// - Thanksgiving (2nd Monday in October)
/// - Remembrance Day (November 11, moved to Monday if weekend)
/// - Christmas Day and Boxing Day (substitute weekdays if weekend)
pub(super) fn settlement() -> &'static MarketCalendar {
    CANADA.get_or_init(|| {
        MarketCalendar::new(
            HolidayCalendarBuilder::new("Canada")
                .add_fixed_monday_holiday(1, 1)
                .add_nth_weekday_holiday_between(2, Weekday::Mon, 3, 2008..=MAX_YEAR)
                .add_easter_holiday(-2)
                .add_custom_holidays(victoria_day)
                .add_fixed_monday_holiday(7, 1)
                .add_nth_weekday_holiday(8, Weekday::Mon, 1)
                .add_nth_weekday_holiday(9, Weekday::Mon, 1)
                .add_fixed_monday_holiday_from(9, 30, 2021)
                .add_nth_weekday_holiday(10, Weekday::Mon, 2)
                .add_fixed_monday_holiday(11, 11)
                .add_custom_holidays(christmas)
                .build(),
        )
    })
}

fn victoria_day(year: i32) -> Vec<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 5, 24)
        .and_then(|may24| {
            let back = i64::from(may24.weekday().num_days_from_monday());
            may24.checked_sub_signed(Duration::days(back))
        })
        .into_iter()
        .collect()
}
