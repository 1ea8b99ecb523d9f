//! German calendars: interbank settlement and the Frankfurt exchanges.

use std::sync::OnceLock;

use super::bitmap::{HolidayBitmap, HolidayCalendarBuilder, MarketCalendar};

static GERMANY_SETTLEMENT: OnceLock<MarketCalendar> = OnceLock::new();
static FRANKFURT_STOCK_EXCHANGE: OnceLock<MarketCalendar> = OnceLock::new();
static EUREX: OnceLock<MarketCalendar> = OnceLock::new();

/// German settlement calendar.
///
/// ## Holidays
///
/// - New Year's Day
/// - Good Friday and Easter Monday
/// - Ascension Day, Whit Monday and Corpus Christi
/// - Labour Day (May 1)
/// - Day of German Unity (October 3, since 1990)
/// - Christmas Eve, Christmas Day and Boxing Day
pub(super) fn settlement() -> &'static MarketCalendar {
    GERMANY_SETTLEMENT.get_or_init(|| {
        MarketCalendar::new(
            HolidayCalendarBuilder::new("Germany Settlement")
                .add_fixed_holiday(1, 1, false)
                .add_easter_holiday(-2)
                .add_easter_holiday(1)
                .add_easter_holiday(39)
                .add_easter_holiday(50)
                .add_easter_holiday(60)
                .add_fixed_holiday(5, 1, false)
                .add_fixed_holiday_from(10, 3, 1990, false)
                .add_fixed_holiday(12, 24, false)
                .add_fixed_holiday(12, 25, false)
                .add_fixed_holiday(12, 26, false)
                .build(),
        )
    })
}

/// Frankfurt Stock Exchange (Xetra).
///
/// ## Holidays
///
/// - New Year's Day
/// - Good Friday and Easter Monday
/// - Labour Day (May 1)
/// - Christmas Eve, Christmas Day and Boxing Day
/// - New Year's Eve
pub(super) fn frankfurt_stock_exchange() -> &'static MarketCalendar {
    FRANKFURT_STOCK_EXCHANGE
        .get_or_init(|| MarketCalendar::new(exchange_holidays("Frankfurt Stock Exchange")))
}

/// Eurex derivatives exchange. Closes on the same days as Xetra.
pub(super) fn eurex() -> &'static MarketCalendar {
    EUREX.get_or_init(|| MarketCalendar::new(exchange_holidays("Eurex")))
}

fn exchange_holidays(name: &'static str) -> HolidayBitmap {
    HolidayCalendarBuilder::new(name)
        .add_fixed_holiday(1, 1, false)
        .add_easter_holiday(-2)
        .add_easter_holiday(1)
        .add_fixed_holiday(5, 1, false)
        .add_fixed_holiday(12, 24, false)
        .add_fixed_holiday(12, 25, false)
        .add_fixed_holiday(12, 26, false)
        .add_fixed_holiday(12, 31, false)
        .build()
}
