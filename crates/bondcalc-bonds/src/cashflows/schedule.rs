//! Coupon period generation.
//!
//! Periods are generated backward from maturity, so any irregular period is
//! a front stub. Interior dates are rolled with the bond's calendar and
//! business-day rule; the issue and maturity dates are kept as given.
//!
//! # Example
//!
//! ```rust
//! use bondcalc_bonds::cashflows::{Schedule, ScheduleConfig};
//! use bondcalc_core::types::{Date, Frequency};
//!
//! let config = ScheduleConfig::new(
//!     Date::from_ymd(2025, 3, 1).unwrap(),
//!     Date::from_ymd(2027, 1, 15).unwrap(),
//!     Frequency::SemiAnnual,
//! );
//!
//! let schedule = Schedule::generate(&config).unwrap();
//! let first = schedule.periods()[0];
//! assert!(!first.is_regular());
//! assert_eq!(first.reference_start, Date::from_ymd(2025, 1, 15).unwrap());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bondcalc_core::calendars::{BusinessDayConvention, CalendarId};
use bondcalc_core::daycounts::DayCountConvention;
use bondcalc_core::types::{Date, Frequency};

use crate::error::{BondError, BondResult};

/// Configuration for schedule generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Issue date (first accrual start).
    pub issue_date: Date,
    /// Maturity date (last payment).
    pub maturity_date: Date,
    /// Coupon frequency.
    pub frequency: Frequency,
    /// Calendar for business day adjustments.
    pub calendar: CalendarId,
    /// Business day adjustment convention.
    pub business_day_convention: BusinessDayConvention,
}

impl ScheduleConfig {
    /// Creates a configuration with no holiday adjustment.
    #[must_use]
    pub fn new(issue_date: Date, maturity_date: Date, frequency: Frequency) -> Self {
        Self {
            issue_date,
            maturity_date,
            frequency,
            calendar: CalendarId::NullCalendar,
            business_day_convention: BusinessDayConvention::Unadjusted,
        }
    }

    /// Sets the calendar for business day adjustments.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarId) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the business day convention.
    #[must_use]
    pub fn with_business_day_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.business_day_convention = convention;
        self
    }
}

/// One coupon period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponPeriod {
    /// Adjusted accrual start.
    pub accrual_start: Date,
    /// Adjusted accrual end, which is also the payment date.
    pub accrual_end: Date,
    /// Unadjusted start of the notional full period.
    pub reference_start: Date,
    /// Unadjusted end of the notional full period.
    pub reference_end: Date,
    /// Unadjusted start of this period.
    pub unadjusted_start: Date,
}

impl CouponPeriod {
    /// Returns the payment date.
    #[must_use]
    pub fn payment_date(&self) -> Date {
        self.accrual_end
    }

    /// Returns true unless this period is a stub.
    #[must_use]
    pub fn is_regular(&self) -> bool {
        self.unadjusted_start == self.reference_start
    }

    /// Share of a regular coupon earned over this period.
    ///
    /// One for regular periods; for a stub, the day count of the stub over
    /// the day count of the notional full period.
    #[must_use]
    pub fn coupon_fraction(&self, day_count: DayCountConvention) -> Decimal {
        if self.is_regular() {
            return Decimal::ONE;
        }
        let full = day_count.day_count(self.reference_start, self.reference_end);
        if full <= 0 {
            return Decimal::ONE;
        }
        let stub = day_count.day_count(self.unadjusted_start, self.reference_end);
        Decimal::from(stub) / Decimal::from(full)
    }

    /// Returns true if `date` falls inside `[accrual_start, accrual_end)`.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.accrual_start <= date && date < self.accrual_end
    }
}

/// An ordered list of coupon periods from issue to maturity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    periods: Vec<CouponPeriod>,
}

impl Schedule {
    /// Generates the coupon periods for a configuration.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidTerms` if maturity is not after issue, and
    /// propagates date-arithmetic and calendar errors.
    pub fn generate(config: &ScheduleConfig) -> BondResult<Self> {
        if config.maturity_date <= config.issue_date {
            return Err(BondError::invalid_terms(
                "Maturity date must be after issue date",
            ));
        }

        let months = config.frequency.months_per_period() as i32;
        let (unadjusted, first_reference) = Self::generate_backward(config, months)?;

        let calendar = config.calendar.calendar();
        let last = unadjusted.len() - 1;
        let mut adjusted = Vec::with_capacity(unadjusted.len());
        for (i, &date) in unadjusted.iter().enumerate() {
            if i == 0 || i == last {
                adjusted.push(date);
            } else {
                adjusted.push(calendar.adjust(date, config.business_day_convention)?);
            }
        }

        let mut periods = Vec::with_capacity(last);
        let mut start = 0;
        for end in 1..=last {
            // Two dates rolled onto the same day collapse into one period.
            if adjusted[end] <= adjusted[start] {
                continue;
            }
            // A first period that absorbed collapsed dates is a long stub
            // measured against the regular period ending at its payment date.
            let reference_start = match (start, end) {
                (0, 1) => first_reference,
                (0, _) => unadjusted[end - 1],
                _ => unadjusted[start],
            };
            periods.push(CouponPeriod {
                accrual_start: adjusted[start],
                accrual_end: adjusted[end],
                reference_start,
                reference_end: unadjusted[end],
                unadjusted_start: unadjusted[start],
            });
            start = end;
        }

        Ok(Self { periods })
    }

    /// Unadjusted dates from issue to maturity, stepping back from maturity,
    /// together with the regular date on or before issue that starts the
    /// notional first period.
    fn generate_backward(config: &ScheduleConfig, months: i32) -> BondResult<(Vec<Date>, Date)> {
        let mut dates = vec![config.maturity_date];
        let mut step = 1;
        let first_reference = loop {
            let date = config.maturity_date.add_months(-months * step)?;
            if date <= config.issue_date {
                break date;
            }
            dates.push(date);
            step += 1;
        };
        dates.push(config.issue_date);
        dates.reverse();
        Ok((dates, first_reference))
    }

    /// Returns the coupon periods.
    #[must_use]
    pub fn periods(&self) -> &[CouponPeriod] {
        &self.periods
    }

    /// Returns the payment dates.
    pub fn payment_dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.periods.iter().map(CouponPeriod::payment_date)
    }

    /// Returns the number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Returns true if there are no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Returns the period containing `date`, if any.
    #[must_use]
    pub fn period_containing(&self, date: Date) -> Option<&CouponPeriod> {
        self.periods.iter().find(|p| p.contains(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_regular_semi_annual() {
        let config = ScheduleConfig::new(date(2025, 1, 15), date(2035, 1, 15), Frequency::SemiAnnual);
        let schedule = Schedule::generate(&config).unwrap();

        assert_eq!(schedule.len(), 20);
        assert!(schedule.periods().iter().all(CouponPeriod::is_regular));
        assert_eq!(schedule.periods()[0].accrual_start, date(2025, 1, 15));
        assert_eq!(schedule.periods()[0].payment_date(), date(2025, 7, 15));
        assert_eq!(schedule.payment_dates().last(), Some(date(2035, 1, 15)));
    }

    #[test]
    fn test_front_stub() {
        let config = ScheduleConfig::new(date(2025, 3, 1), date(2027, 1, 15), Frequency::SemiAnnual);
        let schedule = Schedule::generate(&config).unwrap();

        assert_eq!(schedule.len(), 4);
        let stub = schedule.periods()[0];
        assert!(!stub.is_regular());
        assert_eq!(stub.accrual_start, date(2025, 3, 1));
        assert_eq!(stub.accrual_end, date(2025, 7, 15));
        assert_eq!(stub.reference_start, date(2025, 1, 15));

        // 30/360: stub 2025-03-01..07-15 is 134 days of a 180 day period
        let fraction = stub.coupon_fraction(DayCountConvention::Thirty360US);
        assert_eq!(fraction, dec!(134) / dec!(180));
        assert!(schedule.periods()[1].is_regular());
    }

    #[test]
    fn test_short_bond_single_period() {
        let config = ScheduleConfig::new(date(2025, 5, 1), date(2025, 7, 15), Frequency::Annual);
        let schedule = Schedule::generate(&config).unwrap();

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.periods()[0].reference_start, date(2024, 7, 15));
        assert!(schedule.periods()[0].coupon_fraction(DayCountConvention::Act365Fixed) < Decimal::ONE);
    }

    #[test]
    fn test_adjusted_interior_dates() {
        // 2025-03-15 and 2025-06-15 fall on weekends
        let config = ScheduleConfig::new(date(2024, 12, 15), date(2025, 12, 15), Frequency::Quarterly)
            .with_calendar(CalendarId::WeekendsOnly)
            .with_business_day_convention(BusinessDayConvention::Following);
        let schedule = Schedule::generate(&config).unwrap();
        let dates: Vec<Date> = schedule.payment_dates().collect();

        assert_eq!(
            dates,
            vec![
                date(2025, 3, 17),
                date(2025, 6, 16),
                date(2025, 9, 15),
                date(2025, 12, 15),
            ]
        );
        assert_eq!(schedule.periods()[1].accrual_start, date(2025, 3, 17));
        assert!(schedule.periods().iter().all(CouponPeriod::is_regular));
    }

    #[test]
    fn test_collapsed_first_date_makes_long_stub() {
        // Issue Friday 2025-01-17; the first coupon date, Saturday
        // 2025-01-18, rolls back onto issue and merges into the next period
        let config = ScheduleConfig::new(date(2025, 1, 17), date(2026, 1, 18), Frequency::SemiAnnual)
            .with_calendar(CalendarId::WeekendsOnly)
            .with_business_day_convention(BusinessDayConvention::Preceding);
        let schedule = Schedule::generate(&config).unwrap();

        assert_eq!(schedule.len(), 2);
        let long = schedule.periods()[0];
        assert!(!long.is_regular());
        assert_eq!(long.accrual_start, date(2025, 1, 17));
        assert_eq!(long.accrual_end, date(2025, 7, 18));
        assert_eq!(long.reference_start, date(2025, 1, 18));
        assert_eq!(long.reference_end, date(2025, 7, 18));

        // 30/360: 181 days against a 180 day period
        let fraction = long.coupon_fraction(DayCountConvention::Thirty360US);
        assert_eq!(fraction, dec!(181) / dec!(180));
        assert!(schedule.periods()[1].is_regular());
    }

    #[test]
    fn test_period_containing() {
        let config = ScheduleConfig::new(date(2025, 1, 15), date(2026, 1, 15), Frequency::SemiAnnual);
        let schedule = Schedule::generate(&config).unwrap();

        let period = schedule.period_containing(date(2025, 7, 15)).unwrap();
        assert_eq!(period.accrual_start, date(2025, 7, 15));
        assert!(schedule.period_containing(date(2026, 1, 15)).is_none());
    }

    #[test]
    fn test_end_of_month_maturity() {
        let config = ScheduleConfig::new(date(2024, 2, 29), date(2026, 8, 31), Frequency::SemiAnnual);
        let schedule = Schedule::generate(&config).unwrap();
        let dates: Vec<Date> = schedule.payment_dates().collect();

        assert_eq!(dates[0], date(2024, 8, 31));
        assert_eq!(dates[1], date(2025, 2, 28));
        assert_eq!(dates[2], date(2025, 8, 31));
    }

    #[test]
    fn test_invalid_range() {
        let config = ScheduleConfig::new(date(2025, 1, 15), date(2025, 1, 15), Frequency::Annual);
        assert!(Schedule::generate(&config).is_err());
    }
}
