//! United Kingdom calendars (England and Wales bank holidays).

use chrono::{Datelike, NaiveDate, Weekday};
use std::sync::OnceLock;

use super::bitmap::{
    last_weekday_of_month, nth_weekday_of_month, HolidayBitmap, HolidayCalendarBuilder,
    MarketCalendar,
};

static UK_SETTLEMENT: OnceLock<MarketCalendar> = OnceLock::new();
static UK_EXCHANGE: OnceLock<MarketCalendar> = OnceLock::new();
static UK_METALS: OnceLock<MarketCalendar> = OnceLock::new();

/// UK settlement calendar.
///
/// ## Holidays
///
/// - New Year's Day (January 1, substitute Monday if weekend)
/// - Good Friday and Easter Monday
/// - Early May Bank Holiday (1st Monday in May, since 1978)
/// - Spring Bank Holiday (last Monday in May)
/// - Summer Bank Holiday (last Monday in August)
/// - Christmas Day and Boxing Day (substitute weekdays if weekend)
/// - One-off royal and millennium holidays
pub(super) fn settlement() -> &'static MarketCalendar {
    UK_SETTLEMENT.get_or_init(|| MarketCalendar::new(bank_holidays("UK Settlement")))
}

/// London Stock Exchange. Closes on the same days as UK settlement.
pub(super) fn exchange() -> &'static MarketCalendar {
    UK_EXCHANGE.get_or_init(|| MarketCalendar::new(bank_holidays("UK Exchange")))
}

/// London Metal Exchange. Closes on the same days as UK settlement.
pub(super) fn metals() -> &'static MarketCalendar {
    UK_METALS.get_or_init(|| MarketCalendar::new(bank_holidays("UK Metals")))
}

fn bank_holidays(name: &'static str) -> HolidayBitmap {
    HolidayCalendarBuilder::new(name)
        .add_custom_holidays(new_years_day)
        .add_easter_holiday(-2)
        .add_easter_holiday(1)
        .add_custom_holidays(early_may_bank_holiday)
        .add_custom_holidays(spring_bank_holiday)
        .add_last_weekday_holiday(8, Weekday::Mon)
        .add_custom_holidays(christmas)
        .add_dates(&[
            // Silver Jubilee
            (1977, 6, 7),
            // Royal Wedding
            (1981, 7, 29),
            // Millennium
            (1999, 12, 31),
            // Golden Jubilee
            (2002, 6, 3),
            // Royal Wedding
            (2011, 4, 29),
            // Diamond Jubilee
            (2012, 6, 5),
            // Platinum Jubilee
            (2022, 6, 3),
            // State funeral of Queen Elizabeth II
            (2022, 9, 19),
            // Coronation of King Charles III
            (2023, 5, 8),
        ])
        .build()
}

fn new_years_day(year: i32) -> Vec<NaiveDate> {
    let substitute_day = |date: NaiveDate| match date.weekday() {
        Weekday::Sat => 3,
        Weekday::Sun => 2,
        _ => 1,
    };

    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|jan1| NaiveDate::from_ymd_opt(year, 1, substitute_day(jan1)))
        .into_iter()
        .collect()
}

/// 1st Monday in May; moved to May 8 for VE Day anniversaries in 1995 and 2020.
fn early_may_bank_holiday(year: i32) -> Vec<NaiveDate> {
    let date = match year {
        _ if year < 1978 => None,
        1995 | 2020 => NaiveDate::from_ymd_opt(year, 5, 8),
        _ => nth_weekday_of_month(year, 5, Weekday::Mon, 1),
    };
    date.into_iter().collect()
}

/// Last Monday in May, moved for the 2002, 2012 and 2022 jubilees.
fn spring_bank_holiday(year: i32) -> Vec<NaiveDate> {
    let date = match year {
        2002 | 2012 => NaiveDate::from_ymd_opt(year, 6, 4),
        2022 => NaiveDate::from_ymd_opt(year, 6, 2),
        _ => last_weekday_of_month(year, 5, Weekday::Mon),
    };
    date.into_iter().collect()
}

/// Christmas and Boxing Day; weekend days move to the next free weekdays.
pub(super) fn christmas(year: i32) -> Vec<NaiveDate> {
    let days: [u32; 2] = match NaiveDate::from_ymd_opt(year, 12, 25).map(|d| d.weekday()) {
        Some(Weekday::Fri) => [25, 28],
        Some(Weekday::Sat) => [27, 28],
        Some(Weekday::Sun) => [26, 27],
        Some(_) => [25, 26],
        None => return Vec::new(),
    };
    days.iter()
        .filter_map(|&d| NaiveDate::from_ymd_opt(year, 12, d))
        .collect()
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
    fn test_uk_new_years_substitute() {
        let cal = settlement();

        assert!(!cal.is_business_day(date(2025, 1, 1)));
        // 2022-01-01 was a Saturday: substitute Monday January 3
        assert!(!cal.is_business_day(date(2022, 1, 3)));
        // 2023-01-01 was a Sunday: substitute Monday January 2
        assert!(!cal.is_business_day(date(2023, 1, 2)));
    }

    #[test]
    fn test_uk_bank_holidays_2025() {
        for cal in [exchange(), metals()] {
            assert!(!cal.is_business_day(date(2025, 4, 18)));
            assert!(!cal.is_business_day(date(2025, 4, 21)));
            assert!(!cal.is_business_day(date(2025, 5, 5)));
            assert!(!cal.is_business_day(date(2025, 5, 26)));
            assert!(!cal.is_business_day(date(2025, 8, 25)));
            assert!(cal.is_business_day(date(2025, 8, 26)));
        }
    }

    #[test]
    fn test_uk_moved_holidays() {
        let cal = settlement();

        // VE Day 2020 replaced the first Monday in May
        assert!(!cal.is_business_day(date(2020, 5, 8)));
        assert!(cal.is_business_day(date(2020, 5, 4)));
        // Platinum Jubilee 2022
        assert!(!cal.is_business_day(date(2022, 6, 2)));
        assert!(!cal.is_business_day(date(2022, 6, 3)));
        assert!(cal.is_business_day(date(2022, 5, 30)));
    }

    #[test]
    fn test_uk_christmas_on_weekend() {
        let cal = settlement();

        // 2021: Christmas Saturday, Boxing Day Sunday
        assert!(!cal.is_business_day(date(2021, 12, 27)));
        assert!(!cal.is_business_day(date(2021, 12, 28)));
        assert!(cal.is_business_day(date(2021, 12, 29)));
    }
}
