//! United States calendars: settlement, government bond, NYSE and Federal
//! Reserve.

use chrono::Weekday;
use std::sync::OnceLock;

use super::bitmap::{
    sunday_to_monday, HolidayBitmap, HolidayCalendarBuilder, MarketCalendar, MAX_YEAR, MIN_YEAR,
};

static US_SETTLEMENT: OnceLock<MarketCalendar> = OnceLock::new();
static US_GOVERNMENT_BOND: OnceLock<MarketCalendar> = OnceLock::new();
static US_NYSE: OnceLock<MarketCalendar> = OnceLock::new();
static US_FEDERAL_RESERVE: OnceLock<MarketCalendar> = OnceLock::new();

/// Generic US settlement calendar.
///
/// Federal holidays, with Saturday holidays observed on Friday and Sunday
/// holidays on Monday: New Year's Day, Martin Luther King Jr. Day (since
/// 1983), Presidents' Day, Memorial Day, Juneteenth (since 2021),
/// Independence Day, Labor Day, Columbus Day, Veterans Day, Thanksgiving and
/// Christmas.
pub(super) fn settlement() -> &'static MarketCalendar {
    US_SETTLEMENT.get_or_init(|| MarketCalendar::new(federal_holidays("US Settlement").build()))
}

/// US government bond market (SIFMA recommendations): the settlement
/// holidays plus Good Friday.
pub(super) fn government_bond() -> &'static MarketCalendar {
    US_GOVERNMENT_BOND.get_or_init(|| {
        MarketCalendar::new(
            federal_holidays("US Government Bond")
                .add_easter_holiday(-2)
                .build(),
        )
    })
}

/// New York Stock Exchange.
pub(super) fn nyse() -> &'static MarketCalendar {
    US_NYSE.get_or_init(|| MarketCalendar::new(build_nyse_holidays()))
}

/// Federal Reserve banking holidays. Sunday holidays move to Monday;
/// Saturday holidays are not observed.
pub(super) fn federal_reserve() -> &'static MarketCalendar {
    US_FEDERAL_RESERVE.get_or_init(|| MarketCalendar::new(build_fed_holidays()))
}

fn federal_holidays(name: &'static str) -> HolidayCalendarBuilder {
    HolidayCalendarBuilder::new(name)
        .add_fixed_holiday(1, 1, true)
        .add_nth_weekday_holiday_between(1, Weekday::Mon, 3, 1983..=MAX_YEAR)
        .add_nth_weekday_holiday(2, Weekday::Mon, 3)
        .add_last_weekday_holiday(5, Weekday::Mon)
        .add_fixed_holiday_from(6, 19, 2021, true)
        .add_fixed_holiday(7, 4, true)
        .add_nth_weekday_holiday(9, Weekday::Mon, 1)
        .add_nth_weekday_holiday(10, Weekday::Mon, 2)
        .add_fixed_holiday(11, 11, true)
        .add_nth_weekday_holiday(11, Weekday::Thu, 4)
        .add_fixed_holiday(12, 25, true)
}

fn build_nyse_holidays() -> HolidayBitmap {
    HolidayCalendarBuilder::new("US NYSE")
        // New Year's Day falling on Saturday is not observed on the prior Friday
        .add_custom_holidays(|year| {
            chrono::NaiveDate::from_ymd_opt(year, 1, 1)
                .map(sunday_to_monday)
                .into_iter()
                .collect()
        })
        .add_nth_weekday_holiday_between(1, Weekday::Mon, 3, 1998..=MAX_YEAR)
        .add_nth_weekday_holiday(2, Weekday::Mon, 3)
        .add_easter_holiday(-2)
        .add_last_weekday_holiday(5, Weekday::Mon)
        .add_fixed_holiday_from(6, 19, 2022, true)
        .add_fixed_holiday(7, 4, true)
        .add_nth_weekday_holiday(9, Weekday::Mon, 1)
        .add_nth_weekday_holiday(11, Weekday::Thu, 4)
        .add_fixed_holiday(12, 25, true)
        // Unscheduled closings
        .add_dates(&[
            (1985, 9, 27),
            (1994, 4, 27),
            (2001, 9, 11),
            (2001, 9, 12),
            (2001, 9, 13),
            (2001, 9, 14),
            (2004, 6, 11),
            (2007, 1, 2),
            (2012, 10, 29),
            (2012, 10, 30),
            (2018, 12, 5),
            (2025, 1, 9),
        ])
        .build()
}

fn build_fed_holidays() -> HolidayBitmap {
    // (month, day, first year)
    let fixed: [(u32, u32, i32); 5] = [
        (1, 1, MIN_YEAR),
        (6, 19, 2021),
        (7, 4, MIN_YEAR),
        (11, 11, MIN_YEAR),
        (12, 25, MIN_YEAR),
    ];

    HolidayCalendarBuilder::new("US Federal Reserve")
        .add_custom_holidays(move |year| {
            fixed
                .iter()
                .filter(|&&(_, _, from)| year >= from)
                .filter_map(|&(m, d, _)| chrono::NaiveDate::from_ymd_opt(year, m, d))
                .map(sunday_to_monday)
                .collect()
        })
        .add_nth_weekday_holiday_between(1, Weekday::Mon, 3, 1983..=MAX_YEAR)
        .add_nth_weekday_holiday(2, Weekday::Mon, 3)
        .add_last_weekday_holiday(5, Weekday::Mon)
        .add_nth_weekday_holiday(9, Weekday::Mon, 1)
        .add_nth_weekday_holiday(10, Weekday::Mon, 2)
        .add_nth_weekday_holiday(11, Weekday::Thu, 4)
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
    fn test_settlement_observed_holidays() {
        let cal = settlement();

        // Independence Day 2026 is a Saturday, observed Friday July 3
        assert!(!cal.is_business_day(date(2026, 7, 3)));
        // Thanksgiving 2025
        assert!(!cal.is_business_day(date(2025, 11, 27)));
        // Columbus Day 2025
        assert!(!cal.is_business_day(date(2025, 10, 13)));
        // Good Friday is a settlement business day
        assert!(cal.is_business_day(date(2025, 4, 18)));
    }

    #[test]
    fn test_government_bond_adds_good_friday() {
        let cal = government_bond();

        assert!(!cal.is_business_day(date(2025, 4, 18)));
        assert!(!cal.is_business_day(date(2025, 11, 11)));
    }

    #[test]
    fn test_nyse() {
        let cal = nyse();

        assert!(!cal.is_business_day(date(2025, 4, 18)));
        // Columbus and Veterans Day: exchange open
        assert!(cal.is_business_day(date(2025, 10, 13)));
        assert!(cal.is_business_day(date(2025, 11, 11)));
        // 2022-01-01 was a Saturday: Friday Dec 31 2021 was a trading day
        assert!(cal.is_business_day(date(2021, 12, 31)));
        // National day of mourning
        assert!(!cal.is_business_day(date(2025, 1, 9)));
    }

    #[test]
    fn test_federal_reserve_no_friday_observance() {
        let cal = federal_reserve();

        // July 4 2026 is a Saturday: the Fed is open on Friday
        assert!(cal.is_business_day(date(2026, 7, 3)));
        // July 4 2027 is a Sunday: closed Monday
        assert!(!cal.is_business_day(date(2027, 7, 5)));
        // Juneteenth 2025 (Thursday)
        assert!(!cal.is_business_day(date(2025, 6, 19)));
    }
}
