//! Swiss settlement calendar.

use std::sync::OnceLock;

use super::bitmap::{HolidayCalendarBuilder, MarketCalendar};

static SWITZERLAND: OnceLock<MarketCalendar> = OnceLock::new();

/// Switzerland settlement calendar.
///
/// ## Holidays
///
/// - New Year's Day and Berchtoldstag (January 2)
/// - Good Friday and Easter Monday
/// - Ascension Day and Whit Monday
/// - Labour Day (May 1)
/// - National Day (August 1)
/// - Christmas Day and St. Stephen's Day
pub(super) fn settlement() -> &'static MarketCalendar {
    SWITZERLAND.get_or_init(|| {
        MarketCalendar::new(
            HolidayCalendarBuilder::new("Switzerland")
                .add_fixed_holiday(1, 1, false)
                .add_fixed_holiday(1, 2, false)
                .add_easter_holiday(-2)
                .add_easter_holiday(1)
                .add_easter_holiday(39)
                .add_easter_holiday(50)
                .add_fixed_holiday(5, 1, false)
                .add_fixed_holiday(8, 1, false)
                .add_fixed_holiday(12, 25, false)
                .add_fixed_holiday(12, 26, false)
                .build(),
        )
    })
}
