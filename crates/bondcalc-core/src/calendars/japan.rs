//! Japan settlement calendar (national holidays plus the bank year-end break).

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;
use std::sync::OnceLock;

use super::bitmap::{
    nth_weekday_of_month, HolidayBitmap, HolidayCalendarBuilder, MarketCalendar,
};

static JAPAN_CALENDAR: OnceLock<MarketCalendar> = OnceLock::new();

/// Japan calendar.
///
/// Beyond the fixed and "Happy Monday" national holidays:
///
/// - January 2-3 and December 31 are bank holidays
/// - A holiday falling on Sunday moves to the next non-holiday (furikae kyujitsu)
/// - A day between two holidays is itself a holiday (kokumin no kyujitsu)
pub(super) fn global() -> &'static MarketCalendar {
    JAPAN_CALENDAR.get_or_init(|| MarketCalendar::new(build_japan_holidays()))
}

fn build_japan_holidays() -> HolidayBitmap {
    HolidayCalendarBuilder::new("Japan")
        .add_custom_holidays(holidays_for_year)
        .build()
}

fn holidays_for_year(year: i32) -> Vec<NaiveDate> {
    let national = national_holidays(year);

    let mut all: BTreeSet<NaiveDate> = national.clone();

    // Citizens' holiday: a weekday squeezed between two national holidays
    for &day in &national {
        let Some(between) = day.succ_opt() else {
            continue;
        };
        let squeezed = between
            .succ_opt()
            .is_some_and(|after| national.contains(&after));
        if squeezed && between.weekday() != Weekday::Sun && !national.contains(&between) {
            all.insert(between);
        }
    }

    // Substitute holiday for national holidays falling on a Sunday
    for &day in &national {
        if day.weekday() != Weekday::Sun {
            continue;
        }
        let mut substitute = day;
        while let Some(next) = substitute.succ_opt() {
            substitute = next;
            if !all.contains(&substitute) {
                all.insert(substitute);
                break;
            }
        }
    }

    for (month, day) in [(1, 2), (1, 3), (12, 31)] {
        if let Some(d) = NaiveDate::from_ymd_opt(year, month, day) {
            all.insert(d);
        }
    }

    all.into_iter().collect()
}

fn national_holidays(year: i32) -> BTreeSet<NaiveDate> {
    let ymd = |m: u32, d: u32| NaiveDate::from_ymd_opt(year, m, d);
    let monday = |m: u32, n: u32| nth_weekday_of_month(year, m, Weekday::Mon, n);

    let candidates = [
        ymd(1, 1),
        // Coming of Age Day
        if year >= 2000 { monday(1, 2) } else { ymd(1, 15) },
        // National Foundation Day
        ymd(2, 11),
        // Emperor's Birthday
        match year {
            2020.. => ymd(2, 23),
            1989..=2018 => ymd(12, 23),
            _ => None,
        },
        ymd(3, vernal_equinox_day(year)),
        // Showa Day (Emperor's Birthday until 1988, Greenery Day 1989-2006)
        ymd(4, 29),
        ymd(5, 3),
        // Greenery Day since 2007
        if year >= 2007 { ymd(5, 4) } else { None },
        ymd(5, 5),
        // Marine Day
        match year {
            2020 => ymd(7, 23),
            2021 => ymd(7, 22),
            2003.. => monday(7, 3),
            1996..=2002 => ymd(7, 20),
            _ => None,
        },
        // Mountain Day
        match year {
            2020 => ymd(8, 10),
            2021 => ymd(8, 8),
            2016.. => ymd(8, 11),
            _ => None,
        },
        // Respect for the Aged Day
        if year >= 2003 { monday(9, 3) } else { ymd(9, 15) },
        ymd(9, autumnal_equinox_day(year)),
        // Sports Day
        match year {
            2020 => ymd(7, 24),
            2021 => ymd(7, 23),
            2000.. => monday(10, 2),
            _ => ymd(10, 10),
        },
        ymd(11, 3),
        ymd(11, 23),
    ];

    let special: &[(u32, u32)] = match year {
        // Funeral of Emperor Showa
        1989 => &[(2, 24)],
        // Enthronement of Emperor Akihito
        1990 => &[(11, 12)],
        // Wedding of Crown Prince Naruhito
        1993 => &[(6, 9)],
        // Abdication and enthronement
        2019 => &[(4, 30), (5, 1), (5, 2), (10, 22)],
        _ => &[],
    };

    candidates
        .into_iter()
        .flatten()
        .chain(special.iter().filter_map(|&(m, d)| ymd(m, d)))
        .collect()
}

/// Vernal equinox day of March (approximation valid 1980-2099).
fn vernal_equinox_day(year: i32) -> u32 {
    let y = f64::from(year - 1980);
    (20.8431 + 0.242194 * y - (y / 4.0).floor()) as u32
}

/// Autumnal equinox day of September (approximation valid 1980-2099).
fn autumnal_equinox_day(year: i32) -> u32 {
    let y = f64::from(year - 1980);
    (23.2488 + 0.242194 * y - (y / 4.0).floor()) as u32
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
    fn test_japan_new_year_break() {
        let cal = global();

        assert!(!cal.is_business_day(date(2025, 1, 1)));
        assert!(!cal.is_business_day(date(2025, 1, 2)));
        assert!(!cal.is_business_day(date(2025, 1, 3)));
        assert!(!cal.is_business_day(date(2025, 12, 31)));
    }

    #[test]
    fn test_japan_happy_mondays() {
        let cal = global();

        assert!(!cal.is_business_day(date(2025, 1, 13)));
        assert!(!cal.is_business_day(date(2025, 7, 21)));
        assert!(!cal.is_business_day(date(2025, 9, 15)));
        assert!(!cal.is_business_day(date(2025, 10, 13)));
    }

    #[test]
    fn test_japan_substitute_holiday() {
        let cal = global();

        // Children's Day 2024 fell on Sunday: Monday May 6 is a holiday
        assert!(!cal.is_business_day(date(2024, 5, 6)));
        // Emperor's Birthday 2025 was a Sunday
        assert!(!cal.is_business_day(date(2025, 2, 24)));
    }

    #[test]
    fn test_japan_citizens_holiday() {
        let cal = global();

        // 2015-09-22 sits between Respect for the Aged Day and the equinox
        assert!(!cal.is_business_day(date(2015, 9, 22)));
    }

    #[test]
    fn test_japan_equinoxes() {
        assert_eq!(vernal_equinox_day(2025), 20);
        assert_eq!(autumnal_equinox_day(2025), 23);
    }
}
