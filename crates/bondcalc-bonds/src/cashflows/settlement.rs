//! Settlement date resolution.

use bondcalc_core::types::Date;

use crate::error::{BondError, BondResult};
use crate::types::BondTerms;

/// Resolves the settlement date for an analytics date.
///
/// An explicit `settlement_date` on the terms wins. Otherwise the analytics
/// date is rolled to a business day with the bond's calendar and rule,
/// advanced by `settlement_days` business days and rolled again.
///
/// # Errors
///
/// Returns `BondError::InvalidTerms` if settlement falls before issue, on the
/// maturity date (nothing is left to pay) or after it, and propagates
/// calendar errors.
///
/// # Example
///
/// ```rust
/// use bondcalc_bonds::cashflows::resolve_settlement;
/// use bondcalc_bonds::types::{BondTerms, BondVariant};
/// use bondcalc_core::calendars::CalendarId;
/// use bondcalc_core::types::Date;
/// use rust_decimal_macros::dec;
///
/// let terms = BondTerms::new(
///     "ZERO",
///     BondVariant::zero_coupon(),
///     dec!(100),
///     Date::from_ymd(2024, 1, 2).unwrap(),
///     Date::from_ymd(2030, 1, 2).unwrap(),
/// )
/// .with_calendar(CalendarId::WeekendsOnly);
///
/// // Friday + 2 business days = Tuesday
/// let friday = Date::from_ymd(2025, 1, 3).unwrap();
/// let settlement = resolve_settlement(&terms, friday).unwrap();
/// assert_eq!(settlement, Date::from_ymd(2025, 1, 7).unwrap());
/// ```
pub fn resolve_settlement(terms: &BondTerms, analytics_date: Date) -> BondResult<Date> {
    let settlement = match terms.settlement_date {
        Some(date) => date,
        None => {
            let calendar = terms.calendar.calendar();
            let convention = terms.business_day_convention;
            let trade = calendar.adjust(analytics_date, convention)?;
            if terms.settlement_days == 0 {
                trade
            } else {
                let days = i32::try_from(terms.settlement_days).map_err(|_| {
                    BondError::invalid_terms("Settlement days must be a non-negative integer")
                })?;
                calendar.adjust(calendar.add_business_days(trade, days), convention)?
            }
        }
    };

    if settlement < terms.issue_date {
        return Err(BondError::invalid_terms(
            "Settlement date cannot be before issue date",
        ));
    }
    if settlement > terms.maturity_date {
        return Err(BondError::invalid_terms(
            "Evaluation date is after maturity date",
        ));
    }
    if settlement == terms.maturity_date {
        return Err(BondError::invalid_terms(
            "No future cash flows: settlement is on the maturity date",
        ));
    }

    Ok(settlement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BondVariant;
    use bondcalc_core::calendars::{BusinessDayConvention, CalendarId};
    use bondcalc_core::types::Frequency;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn terms() -> BondTerms {
        BondTerms::new(
            "FIX",
            BondVariant::fixed(dec!(0.04), Frequency::SemiAnnual),
            dec!(1000),
            date(2024, 1, 15),
            date(2029, 1, 15),
        )
    }

    #[test]
    fn test_explicit_settlement_wins() {
        let terms = terms().with_settlement_date(date(2025, 3, 3));
        assert_eq!(
            resolve_settlement(&terms, date(2025, 1, 1)).unwrap(),
            date(2025, 3, 3)
        );
    }

    #[test]
    fn test_weekend_analytics_date_rolls_first() {
        let terms = terms()
            .with_calendar(CalendarId::WeekendsOnly)
            .with_settlement_days(1);
        // Saturday -> Monday -> Tuesday
        assert_eq!(
            resolve_settlement(&terms, date(2025, 1, 4)).unwrap(),
            date(2025, 1, 7)
        );
    }

    #[test]
    fn test_holidays_are_skipped() {
        // 2025-12-25 and 2025-12-26 are TARGET holidays
        let terms = terms().with_calendar(CalendarId::Target);
        assert_eq!(
            resolve_settlement(&terms, date(2025, 12, 24)).unwrap(),
            date(2025, 12, 30)
        );
    }

    #[test]
    fn test_zero_settlement_days() {
        let terms = terms()
            .with_calendar(CalendarId::NullCalendar)
            .with_business_day_convention(BusinessDayConvention::Unadjusted)
            .with_settlement_days(0);
        assert_eq!(
            resolve_settlement(&terms, date(2025, 1, 4)).unwrap(),
            date(2025, 1, 4)
        );
    }

    #[test]
    fn test_settlement_window_errors() {
        let terms = terms().with_settlement_days(0);
        let err = resolve_settlement(&terms, date(2023, 6, 1)).unwrap_err();
        assert_eq!(
            err,
            BondError::invalid_terms("Settlement date cannot be before issue date")
        );

        let err = resolve_settlement(&terms, date(2029, 6, 1)).unwrap_err();
        assert_eq!(
            err,
            BondError::invalid_terms("Evaluation date is after maturity date")
        );
    }

    #[test]
    fn test_settlement_on_maturity_has_nothing_left() {
        let terms = terms().with_settlement_date(date(2029, 1, 15));
        let err = resolve_settlement(&terms, date(2029, 1, 12)).unwrap_err();
        assert_eq!(
            err,
            BondError::invalid_terms("No future cash flows: settlement is on the maturity date")
        );

        let terms = terms.with_settlement_date(date(2029, 1, 14));
        assert_eq!(
            resolve_settlement(&terms, date(2029, 1, 12)).unwrap(),
            date(2029, 1, 14)
        );
    }
}
