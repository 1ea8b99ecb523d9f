//! TARGET calendar for Eurozone payments and securities settlement.

use std::sync::OnceLock;

use super::bitmap::{HolidayBitmap, HolidayCalendarBuilder, MarketCalendar};

static TARGET_CALENDAR: OnceLock<MarketCalendar> = OnceLock::new();

/// TARGET (Trans-European Automated Real-time Gross settlement Express
/// Transfer) calendar.
///
/// ## Holidays
///
/// - New Year's Day (January 1)
/// - Good Friday and Easter Monday (since 2000)
/// - Labour Day (May 1, since 2000)
/// - Christmas Day (December 25)
/// - Boxing Day (December 26, since 2000)
/// - December 31 in 1998, 1999 and 2001
///
/// Holidays falling on weekends are not moved.
pub(super) fn global() -> &'static MarketCalendar {
    TARGET_CALENDAR.get_or_init(|| MarketCalendar::new(build_target_holidays()))
}

fn build_target_holidays() -> HolidayBitmap {
    HolidayCalendarBuilder::new("TARGET")
        .add_fixed_holiday(1, 1, false)
        .add_fixed_holiday(12, 25, false)
        .add_dates(&[(1998, 12, 31), (1999, 12, 31), (2001, 12, 31)])
        .year_range(2000, super::bitmap::MAX_YEAR)
        .add_easter_holiday(-2)
        .add_easter_holiday(1)
        .add_fixed_holiday(5, 1, false)
        .add_fixed_holiday(12, 26, false)
        .build()
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
    fn test_target_fixed_holidays() {
        let cal = global();

        assert!(!cal.is_business_day(date(2025, 1, 1)));
        assert!(!cal.is_business_day(date(2025, 5, 1)));
        assert!(!cal.is_business_day(date(2025, 12, 25)));
        assert!(!cal.is_business_day(date(2025, 12, 26)));
        // 2028-01-01 is a Saturday and is not moved to Friday
        assert!(cal.is_business_day(date(2027, 12, 31)));
    }

    #[test]
    fn test_target_easter() {
        let cal = global();

        assert!(!cal.is_business_day(date(2025, 4, 18)));
        assert!(!cal.is_business_day(date(2025, 4, 21)));
        assert!(cal.is_business_day(date(2025, 4, 22)));
    }

    #[test]
    fn test_target_before_2000() {
        let cal = global();

        // Labour Day 1998 (Friday) was a TARGET business day
        assert!(cal.is_business_day(date(1998, 5, 1)));
        assert!(!cal.is_business_day(date(1999, 12, 31)));
    }
}
