//! Business day calendars and conventions.
//!
//! This module provides:
//! - Holiday calendars for the supported markets, selected by [`CalendarId`]
//! - Business day adjustment conventions
//! - Business day arithmetic used for settlement

use std::str::FromStr;

use serde::{Deserialize, Serialize};

mod australia;
mod bitmap;
mod canada;
mod conventions;
mod france;
mod germany;
mod japan;
mod switzerland;
mod target;
mod uk;
mod us;

pub use bitmap::{HolidayBitmap, HolidayCalendarBuilder, MarketCalendar, MAX_YEAR, MIN_YEAR};
pub use conventions::{adjust, BusinessDayConvention};

use crate::error::{CoreError, CoreResult};
use crate::types::{normalize_token, Date};

/// Trait for business day calendars.
///
/// Calendars determine which days are business days vs holidays
/// for a specific market or jurisdiction.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday or weekend.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> CoreResult<Date> {
        conventions::adjust(date, convention, self)
    }

    /// Advances a date by a number of business days (backwards if negative).
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.unsigned_abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Counts business days between two dates (exclusive of start, inclusive of end).
    fn business_days_between(&self, start: Date, end: Date) -> i32 {
        let mut count = 0;
        let mut current = start.add_days(1);

        while current <= end {
            if self.is_business_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }

        count
    }
}

/// A weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekends Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Calendar on which every day is a business day.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn name(&self) -> &'static str {
        "Null"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }
}

/// Identifier of a supported holiday calendar.
///
/// Parses case-insensitively from identifiers such as `"US_GOVERNMENT_BOND"`
/// or `"uk exchange"`; anything else is a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CalendarId {
    /// Eurozone TARGET payment system
    #[default]
    Target,
    /// Generic US settlement
    UsSettlement,
    /// US government bond market
    UsGovernmentBond,
    /// New York Stock Exchange
    UsNyse,
    /// US Federal Reserve
    UsFederalReserve,
    /// London Stock Exchange
    UkExchange,
    /// UK settlement
    UkSettlement,
    /// London Metal Exchange
    UkMetals,
    /// German interbank settlement
    GermanySettlement,
    /// Frankfurt Stock Exchange (Xetra)
    GermanyFrankfurtStockExchange,
    /// Eurex derivatives exchange
    GermanyEurex,
    /// France
    France,
    /// Switzerland
    Switzerland,
    /// Japan
    Japan,
    /// Canada
    Canada,
    /// Australia
    Australia,
    /// Saturdays and Sundays only
    WeekendsOnly,
    /// Every day is a business day
    NullCalendar,
}

impl CalendarId {
    /// Returns the shared calendar instance, building its holiday table on
    /// first use.
    #[must_use]
    pub fn calendar(&self) -> &'static dyn Calendar {
        match self {
            CalendarId::Target => target::global(),
            CalendarId::UsSettlement => us::settlement(),
            CalendarId::UsGovernmentBond => us::government_bond(),
            CalendarId::UsNyse => us::nyse(),
            CalendarId::UsFederalReserve => us::federal_reserve(),
            CalendarId::UkExchange => uk::exchange(),
            CalendarId::UkSettlement => uk::settlement(),
            CalendarId::UkMetals => uk::metals(),
            CalendarId::GermanySettlement => germany::settlement(),
            CalendarId::GermanyFrankfurtStockExchange => germany::frankfurt_stock_exchange(),
            CalendarId::GermanyEurex => germany::eurex(),
            CalendarId::France => france::settlement(),
            CalendarId::Switzerland => switzerland::settlement(),
            CalendarId::Japan => japan::global(),
            CalendarId::Canada => canada::settlement(),
            CalendarId::Australia => australia::settlement(),
            CalendarId::WeekendsOnly => &WeekendCalendar,
            CalendarId::NullCalendar => &NullCalendar,
        }
    }

    /// Returns the upper-snake identifier.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CalendarId::Target => "TARGET",
            CalendarId::UsSettlement => "US_SETTLEMENT",
            CalendarId::UsGovernmentBond => "US_GOVERNMENT_BOND",
            CalendarId::UsNyse => "US_NYSE",
            CalendarId::UsFederalReserve => "US_FEDERAL_RESERVE",
            CalendarId::UkExchange => "UK_EXCHANGE",
            CalendarId::UkSettlement => "UK_SETTLEMENT",
            CalendarId::UkMetals => "UK_METALS",
            CalendarId::GermanySettlement => "GERMANY_SETTLEMENT",
            CalendarId::GermanyFrankfurtStockExchange => "GERMANY_FRANKFURT_STOCK_EXCHANGE",
            CalendarId::GermanyEurex => "GERMANY_EUREX",
            CalendarId::France => "FRANCE",
            CalendarId::Switzerland => "SWITZERLAND",
            CalendarId::Japan => "JAPAN",
            CalendarId::Canada => "CANADA",
            CalendarId::Australia => "AUSTRALIA",
            CalendarId::WeekendsOnly => "WEEKENDS_ONLY",
            CalendarId::NullCalendar => "NULL_CALENDAR",
        }
    }

    /// Returns all supported calendar identifiers.
    #[must_use]
    pub fn all() -> &'static [CalendarId] {
        &[
            CalendarId::Target,
            CalendarId::UsSettlement,
            CalendarId::UsGovernmentBond,
            CalendarId::UsNyse,
            CalendarId::UsFederalReserve,
            CalendarId::UkExchange,
            CalendarId::UkSettlement,
            CalendarId::UkMetals,
            CalendarId::GermanySettlement,
            CalendarId::GermanyFrankfurtStockExchange,
            CalendarId::GermanyEurex,
            CalendarId::France,
            CalendarId::Switzerland,
            CalendarId::Japan,
            CalendarId::Canada,
            CalendarId::Australia,
            CalendarId::WeekendsOnly,
            CalendarId::NullCalendar,
        ]
    }
}

impl std::fmt::Display for CalendarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CalendarId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = normalize_token(s);
        let id = match token.as_str() {
            "TARGET" | "TARGET2" => CalendarId::Target,
            "US" | "US_SETTLEMENT" => CalendarId::UsSettlement,
            "US_GOVERNMENT_BOND" | "US_GOVT" | "SIFMA" => CalendarId::UsGovernmentBond,
            "US_NYSE" | "NYSE" => CalendarId::UsNyse,
            "US_FEDERAL_RESERVE" | "FED" => CalendarId::UsFederalReserve,
            "UK_EXCHANGE" | "LSE" => CalendarId::UkExchange,
            "UK" | "UK_SETTLEMENT" => CalendarId::UkSettlement,
            "UK_METALS" | "LME" => CalendarId::UkMetals,
            "GERMANY" | "GERMANY_SETTLEMENT" => CalendarId::GermanySettlement,
            "GERMANY_FRANKFURT_STOCK_EXCHANGE" | "XETRA" | "FRANKFURT" => {
                CalendarId::GermanyFrankfurtStockExchange
            }
            "GERMANY_EUREX" | "EUREX" => CalendarId::GermanyEurex,
            "FRANCE" | "FR" => CalendarId::France,
            "SWITZERLAND" | "CH" => CalendarId::Switzerland,
            "JAPAN" | "JP" => CalendarId::Japan,
            "CANADA" | "CA" => CalendarId::Canada,
            "AUSTRALIA" | "AU" => CalendarId::Australia,
            "WEEKENDS_ONLY" | "WEEKEND" => CalendarId::WeekendsOnly,
            "NULL_CALENDAR" | "NULL" | "NONE" => CalendarId::NullCalendar,
            _ => return Err(CoreError::config(format!("unknown calendar '{s}'"))),
        };
        Ok(id)
    }
}

impl TryFrom<String> for CalendarId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarId> for String {
    fn from(value: CalendarId) -> Self {
        value.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;

        assert!(cal.is_business_day(date(2025, 1, 6)));
        assert!(!cal.is_business_day(date(2025, 1, 4)));
        assert!(cal.is_holiday(date(2025, 1, 5)));
    }

    #[test]
    fn test_null_calendar() {
        assert!(NullCalendar.is_business_day(date(2025, 1, 4)));
        assert!(NullCalendar.is_business_day(date(2025, 12, 25)));
    }

    #[test]
    fn test_add_business_days() {
        let cal = WeekendCalendar;
        let friday = date(2025, 1, 3);

        assert_eq!(cal.add_business_days(friday, 1), date(2025, 1, 6));
        assert_eq!(cal.add_business_days(friday, 0), friday);
        assert_eq!(cal.add_business_days(date(2025, 1, 6), -1), friday);
    }

    #[test]
    fn test_add_business_days_skips_holidays() {
        let cal = CalendarId::Target.calendar();

        // Tuesday 2024-12-24 + 2 business days skips Christmas and Boxing Day
        assert_eq!(cal.add_business_days(date(2024, 12, 24), 2), date(2024, 12, 30));
    }

    #[test]
    fn test_business_days_between() {
        let cal = WeekendCalendar;
        assert_eq!(cal.business_days_between(date(2025, 1, 6), date(2025, 1, 10)), 4);
    }

    #[test]
    fn test_calendar_id_parse() {
        assert_eq!(
            "us_government_bond".parse::<CalendarId>().unwrap(),
            CalendarId::UsGovernmentBond
        );
        assert_eq!(
            "Null Calendar".parse::<CalendarId>().unwrap(),
            CalendarId::NullCalendar
        );
        assert!(matches!(
            "MARS".parse::<CalendarId>(),
            Err(CoreError::ConfigError { .. })
        ));
        assert_eq!(
            "Xetra".parse::<CalendarId>().unwrap(),
            CalendarId::GermanyFrankfurtStockExchange
        );
        // Markets without a holiday table are rejected rather than guessed
        assert!("CHINA".parse::<CalendarId>().is_err());
    }

    #[test]
    fn test_each_calendar_keeps_its_own_holidays() {
        // Ascension Day 2025
        let ascension = date(2025, 5, 29);
        assert!(!CalendarId::GermanySettlement.calendar().is_business_day(ascension));
        assert!(!CalendarId::France.calendar().is_business_day(ascension));
        assert!(CalendarId::GermanyEurex.calendar().is_business_day(ascension));
        assert!(CalendarId::Canada.calendar().is_business_day(ascension));
        assert_eq!(CalendarId::Australia.calendar().name(), "Australia");
    }

    #[test]
    fn test_calendar_id_round_trip() {
        for id in CalendarId::all() {
            assert_eq!(id.name().parse::<CalendarId>().unwrap(), *id);
            let json = serde_json::to_string(id).unwrap();
            let back: CalendarId = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *id);
        }
    }

    #[test]
    fn test_calendars_share_instance() {
        let a = CalendarId::UkExchange.calendar();
        let b = CalendarId::UkExchange.calendar();
        assert!(std::ptr::eq(
            a as *const dyn Calendar as *const u8,
            b as *const dyn Calendar as *const u8
        ));
        assert_eq!(a.name(), "UK Exchange");
    }
}
