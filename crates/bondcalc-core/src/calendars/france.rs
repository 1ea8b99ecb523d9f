//! French settlement calendar.

use std::sync::OnceLock;

use super::bitmap::{HolidayCalendarBuilder, MarketCalendar};

static FRANCE: OnceLock<MarketCalendar> = OnceLock::new();

/// France settlement calendar. Holidays falling on a weekend are not moved.
///
/// ## Holidays
///
/// - New Year's Day
/// - Easter Monday
/// - Labour Day (May 1) and Victory in Europe Day (May 8)
/// - Ascension Day and Whit Monday
/// - Bastille Day (July 14)
/// - Assumption (August 15) and All Saints (November 1)
/// - Armistice Day (November 11)
/// - Christmas Day
pub(super) fn settlement() -> &'static MarketCalendar {
    FRANCE.get_or_init(|| {
        MarketCalendar::new(
            HolidayCalendarBuilder::new("France")
                .add_fixed_holiday(1, 1, false)
                .add_easter_holiday(1)
                .add_fixed_holiday(5, 1, false)
                .add_fixed_holiday(5, 8, false)
                .add_easter_holiday(39)
                .add_easter_holiday(50)
                .add_fixed_holiday(7, 14, false)
                .add_fixed_holiday(8, 15, false)
                .add_fixed_holiday(11, 1, false)
                .add_fixed_holiday(11, 11, false)
                .add_fixed_holiday(12, 25, false)
                .build(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::Calendar;
    use crate::types::Date;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_france_2025() {
        let cal = settlement();

        assert!(!cal.is_business_day(date(2025, 4, 21)));
        assert!(!cal.is_business_day(date(2025, 5, 8)));
        assert!(!cal.is_business_day(date(2025, 5, 29)));
        assert!(!cal.is_business_day(date(2025, 7, 14)));
        assert!(!cal.is_business_day(date(2025, 8, 15)));
        assert!(!cal.is_business_day(date(2025, 11, 11)));
        // Good Friday and Boxing Day are working days
        assert!(cal.is_business_day(date(2025, 4, 18)));
        assert!(cal.is_business_day(date(2025, 12, 26)));
    }

    #[test]
    fn test_france_weekend_holidays_not_moved() {
        let cal = settlement();

        // 2026-08-15 is a Saturday; Friday and Monday stay open
        assert!(cal.is_business_day(date(2026, 8, 14)));
        assert!(cal.is_business_day(date(2026, 8, 17)));
    }
}
