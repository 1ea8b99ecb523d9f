//! Holiday tables packed one bit per day.
//!
//! Each market calendar is expanded once from its rules into a
//! [`HolidayBitmap`] spanning [`MIN_YEAR`]..=[`MAX_YEAR`]. Outside that span
//! only weekends are closed.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use super::Calendar;
use crate::types::Date;

/// First year with holiday data.
pub const MIN_YEAR: i32 = 1970;
/// Last year with holiday data.
pub const MAX_YEAR: i32 = 2100;

/// Bit slots per year; day 366 is unused outside leap years.
const SLOTS_PER_YEAR: usize = 366;

/// Holiday set for one calendar.
#[derive(Clone)]
pub struct HolidayBitmap {
    name: &'static str,
    words: Vec<u64>,
}

impl std::fmt::Debug for HolidayBitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidayBitmap")
            .field("name", &self.name)
            .field("holidays", &self.count_holidays())
            .finish()
    }
}

impl HolidayBitmap {
    /// An empty table.
    pub fn new(name: &'static str) -> Self {
        let years = (MAX_YEAR - MIN_YEAR + 1) as usize;
        Self {
            name,
            words: vec![0; (years * SLOTS_PER_YEAR).div_ceil(64)],
        }
    }

    /// Calendar name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Marks `date` closed; ignored outside the supported years.
    pub fn add_holiday(&mut self, date: NaiveDate) {
        if let Some((word, mask)) = slot(date) {
            self.words[word] |= mask;
        }
    }

    /// True for listed holidays only; weekends are not recorded here.
    #[inline]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        slot(date).is_some_and(|(word, mask)| self.words[word] & mask != 0)
    }

    /// Open: a weekday that is not a holiday.
    #[inline]
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !is_weekend(date) && !self.is_holiday(date)
    }

    /// Number of holidays recorded.
    pub fn count_holidays(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

fn slot(date: NaiveDate) -> Option<(usize, u64)> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return None;
    }
    let bit = (date.year() - MIN_YEAR) as usize * SLOTS_PER_YEAR + date.ordinal0() as usize;
    Some((bit / 64, 1u64 << (bit % 64)))
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// A [`Calendar`] over a built holiday table.
#[derive(Debug, Clone)]
pub struct MarketCalendar {
    bitmap: HolidayBitmap,
}

impl MarketCalendar {
    /// Wraps a built table.
    pub fn new(bitmap: HolidayBitmap) -> Self {
        Self { bitmap }
    }
}

impl Calendar for MarketCalendar {
    fn name(&self) -> &'static str {
        self.bitmap.name()
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.bitmap.is_business_day(date.as_naive_date())
    }
}

/// Collects holidays from recurring rules, then packs them.
pub struct HolidayCalendarBuilder {
    name: &'static str,
    years: RangeInclusive<i32>,
    holidays: BTreeSet<NaiveDate>,
}

impl HolidayCalendarBuilder {
    /// A builder over every supported year.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            years: MIN_YEAR..=MAX_YEAR,
            holidays: BTreeSet::new(),
        }
    }

    /// Limits generation to `start..=end`, clipped to the supported years.
    pub fn year_range(mut self, start: i32, end: i32) -> Self {
        self.years = start.max(MIN_YEAR)..=end.min(MAX_YEAR);
        self
    }

    /// Applies `rule` to every year in range that is also in `years`.
    fn each_year<F>(mut self, years: RangeInclusive<i32>, rule: F) -> Self
    where
        F: Fn(i32) -> Vec<NaiveDate>,
    {
        let from = *self.years.start().max(years.start());
        let to = *self.years.end().min(years.end());
        for year in from..=to {
            self.holidays.extend(rule(year));
        }
        self
    }

    /// Same month and day every year; with `observe_weekend` a Saturday
    /// holiday moves to Friday and a Sunday one to Monday.
    pub fn add_fixed_holiday(self, month: u32, day: u32, observe_weekend: bool) -> Self {
        self.add_fixed_holiday_from(month, day, MIN_YEAR, observe_weekend)
    }

    /// [`Self::add_fixed_holiday`] from `from_year` on.
    pub fn add_fixed_holiday_from(
        self,
        month: u32,
        day: u32,
        from_year: i32,
        observe_weekend: bool,
    ) -> Self {
        self.each_year(from_year..=MAX_YEAR, |year| {
            NaiveDate::from_ymd_opt(year, month, day)
                .map(|d| if observe_weekend { observed_date(d) } else { d })
                .into_iter()
                .collect()
        })
    }

    /// Same month and day every year, moved to Monday from a weekend.
    pub fn add_fixed_monday_holiday(self, month: u32, day: u32) -> Self {
        self.add_fixed_monday_holiday_from(month, day, MIN_YEAR)
    }

    /// [`Self::add_fixed_monday_holiday`] from `from_year` on.
    pub fn add_fixed_monday_holiday_from(self, month: u32, day: u32, from_year: i32) -> Self {
        self.each_year(from_year..=MAX_YEAR, |year| {
            NaiveDate::from_ymd_opt(year, month, day)
                .map(weekend_to_monday)
                .into_iter()
                .collect()
        })
    }

    /// The `occurrence`-th `weekday` of `month`, every year.
    pub fn add_nth_weekday_holiday(self, month: u32, weekday: Weekday, occurrence: u32) -> Self {
        self.add_nth_weekday_holiday_between(month, weekday, occurrence, MIN_YEAR..=MAX_YEAR)
    }

    /// The `occurrence`-th `weekday` of `month`, for `years` only.
    pub fn add_nth_weekday_holiday_between(
        self,
        month: u32,
        weekday: Weekday,
        occurrence: u32,
        years: RangeInclusive<i32>,
    ) -> Self {
        self.each_year(years, |year| {
            nth_weekday_of_month(year, month, weekday, occurrence)
                .into_iter()
                .collect()
        })
    }

    /// The last `weekday` of `month`.
    pub fn add_last_weekday_holiday(self, month: u32, weekday: Weekday) -> Self {
        self.each_year(MIN_YEAR..=MAX_YEAR, |year| {
            last_weekday_of_month(year, month, weekday)
                .into_iter()
                .collect()
        })
    }

    /// Easter Sunday shifted by `offset_days` (Good Friday is -2).
    pub fn add_easter_holiday(self, offset_days: i64) -> Self {
        self.each_year(MIN_YEAR..=MAX_YEAR, |year| {
            easter_sunday(year)
                .and_then(|easter| easter.checked_add_signed(Duration::days(offset_days)))
                .into_iter()
                .collect()
        })
    }

    /// Holidays computed by `generator` for each year.
    pub fn add_custom_holidays<F>(self, generator: F) -> Self
    where
        F: Fn(i32) -> Vec<NaiveDate>,
    {
        self.each_year(MIN_YEAR..=MAX_YEAR, generator)
    }

    /// One-off closures as `(year, month, day)`.
    pub fn add_dates(mut self, dates: &[(i32, u32, u32)]) -> Self {
        self.holidays.extend(
            dates
                .iter()
                .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        );
        self
    }

    /// Packs the collected dates.
    pub fn build(self) -> HolidayBitmap {
        let mut bitmap = HolidayBitmap::new(self.name);
        for &date in &self.holidays {
            bitmap.add_holiday(date);
        }
        log::debug!(
            "built {} calendar: {} holidays over {:?}",
            self.name,
            bitmap.count_holidays(),
            self.years
        );
        bitmap
    }
}

/// Saturday to Friday, Sunday to Monday.
pub fn observed_date(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date.pred_opt().unwrap_or(date),
        Weekday::Sun => date.succ_opt().unwrap_or(date),
        _ => date,
    }
}

/// Sunday to Monday; Saturday stays.
pub fn sunday_to_monday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sun => date.succ_opt().unwrap_or(date),
        _ => date,
    }
}

/// Saturday and Sunday both move to the following Monday.
pub fn weekend_to_monday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date.checked_add_signed(Duration::days(2)).unwrap_or(date),
        Weekday::Sun => date.succ_opt().unwrap_or(date),
        _ => date,
    }
}

/// `n`-th `weekday` of the month, 1-based; `None` when the month has fewer.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, u8::try_from(n).ok()?)
}

/// Last `weekday` of the month.
pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let mut day = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    while day.weekday() != weekday {
        day = day.pred_opt()?;
    }
    Some(day)
}

/// Western Easter Sunday (anonymous Gregorian computus).
#[allow(clippy::many_single_char_names)]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let (b, c) = (year / 100, year % 100);
    let (d, e) = (b / 4, b % 4);
    let g = (8 * b + 13) / 25;
    let h = (19 * a + b - d - g + 15) % 30;
    let (i, k) = (c / 4, c % 4);
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 19 * l) / 433;
    let month = (h + l - 7 * m + 90) / 25;
    let day = (h + l - 7 * m + 33 * month + 19) % 32;

    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}
