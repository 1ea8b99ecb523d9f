//! Australian settlement calendar (Sydney).

use chrono::Weekday;
use std::sync::OnceLock;

use super::bitmap::{HolidayCalendarBuilder, MarketCalendar};
use super::uk::christmas;

static AUSTRALIA: OnceLock<MarketCalendar> = OnceLock::new();

/// Australia settlement calendar.
///
/// ## Holidays
///
/// - New Year's Day and Australia Day (January 26), moved to Monday if weekend
/// - Good Friday and Easter Monday
/// - ANZAC Day (April 25)
/// - King's Birthday (2nd Monday in June)
/// - Bank Holiday (1st Monday in August)
/// - Labour Day (1st Monday in October)
/// - Christmas Day and Boxing Day (substitute weekdays if weekend)
/// - National Day of Mourning (2022-09-22)
pub(super) fn settlement() -> &'static MarketCalendar {
    AUSTRALIA.get_or_init(|| {
        MarketCalendar::new(
            HolidayCalendarBuilder::new("Australia")
                .add_fixed_monday_holiday(1, 1)
                .add_fixed_monday_holiday(1, 26)
                .add_easter_holiday(-2)
                .add_easter_holiday(1)
                .add_fixed_holiday(4, 25, false)
                .add_nth_weekday_holiday(6, Weekday::Mon, 2)
                .add_nth_weekday_holiday(8, Weekday::Mon, 1)
                .add_nth_weekday_holiday(10, Weekday::Mon, 1)
                .add_custom_holidays(christmas)
                .add_dates(&[(2022, 9, 22)])
                .build(),
        )
    })
}
