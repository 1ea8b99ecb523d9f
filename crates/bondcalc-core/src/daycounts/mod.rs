//! Day count conventions for fixed income calculations.
//!
//! Day count conventions determine how a date span is converted into a year
//! fraction. A bond uses one convention for both accrued interest and
//! discounting.
//!
//! # Supported Conventions
//!
//! - [`ActActIsda`]: Actual/Actual ISDA - splits the span by calendar year
//! - [`Act360`]: Actual/360 - money market convention
//! - [`Act365Fixed`]: Actual/365 Fixed
//! - [`Thirty360US`]: 30/360 US (bond basis, with February end-of-month rules)
//! - [`Thirty360E`]: 30E/360 (Eurobond basis)
//!
//! # Usage
//!
//! ```rust
//! use bondcalc_core::daycounts::DayCountConvention;
//! use bondcalc_core::types::Date;
//! use rust_decimal::Decimal;
//!
//! let dc = "30/360".parse::<DayCountConvention>().unwrap().to_day_count();
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2025, 2, 1).unwrap();
//!
//! assert_eq!(dc.year_fraction(start, end), Decimal::ONE / Decimal::from(12));
//! ```

mod act360;
mod act365;
mod actact;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use actact::ActActIsda;
pub use thirty360::{Thirty360E, Thirty360US};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{normalize_token, Date};

/// Trait for day count conventions.
///
/// Implementations must be thread-safe (`Send + Sync`): the engine shares a
/// single static instance per convention.
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Negative if `end` is before `start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Calculates the day count between two dates.
    ///
    /// For ACT conventions this is actual calendar days; for 30/360
    /// conventions it uses the 30-day month assumption.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Enumeration of the supported day count conventions.
///
/// Parses from the usual market spellings (`"ACT/365"`, `"ACTUAL_365"`,
/// `"30E/360"`, ...). Unrecognized names fail with
/// [`CoreError::UnsupportedConvention`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayCountConvention {
    /// Actual/Actual ISDA
    ActActIsda,

    /// Actual/360
    Act360,

    /// Actual/365 Fixed
    #[default]
    Act365Fixed,

    /// 30/360 US (Bond Basis)
    Thirty360US,

    /// 30E/360 (Eurobond Basis)
    Thirty360E,
}

impl DayCountConvention {
    /// Returns the shared implementation of this convention.
    #[must_use]
    pub fn to_day_count(&self) -> &'static dyn DayCount {
        match self {
            DayCountConvention::ActActIsda => &ActActIsda,
            DayCountConvention::Act360 => &Act360,
            DayCountConvention::Act365Fixed => &Act365Fixed,
            DayCountConvention::Thirty360US => &Thirty360US,
            DayCountConvention::Thirty360E => &Thirty360E,
        }
    }

    /// Year fraction between two dates under this convention.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        self.to_day_count().year_fraction(start, end)
    }

    /// Day count between two dates under this convention.
    #[must_use]
    pub fn day_count(&self, start: Date, end: Date) -> i64 {
        self.to_day_count().day_count(start, end)
    }

    /// Returns the canonical name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.to_day_count().name()
    }

    /// Returns all supported day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::ActActIsda,
            DayCountConvention::Act360,
            DayCountConvention::Act365Fixed,
            DayCountConvention::Thirty360US,
            DayCountConvention::Thirty360E,
        ]
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = CoreError;

    /// Parses a day count convention from a string.
    ///
    /// Accepts market spellings ("ACT/360", "30/360 US"), enum-style names
    /// ("Act360", "Thirty360US") and the upper-snake identifiers used by
    /// upstream bond records ("ACTUAL_360", "THIRTY_360").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "ACT/ACT" | "ACT/ACT_ISDA" | "ACTUAL/ACTUAL" | "ACTUAL/ACTUAL_ISDA" | "ACTACTISDA"
            | "ACTUAL_ACTUAL" | "ACTACT" => Ok(DayCountConvention::ActActIsda),

            "ACT/360" | "ACTUAL/360" | "ACT360" | "ACTUAL_360" => Ok(DayCountConvention::Act360),

            "ACT/365" | "ACT/365F" | "ACT/365_FIXED" | "ACTUAL/365" | "ACTUAL/365_FIXED"
            | "ACT365FIXED" | "ACT365" | "ACTUAL_365" => Ok(DayCountConvention::Act365Fixed),

            "30/360" | "30/360_US" | "30U/360" | "BOND" | "THIRTY360US" | "THIRTY_360" => {
                Ok(DayCountConvention::Thirty360US)
            }

            "30E/360" | "30/360_ICMA" | "EUROBOND" | "THIRTY360E" | "THIRTY_360_E" => {
                Ok(DayCountConvention::Thirty360E)
            }

            _ => Err(CoreError::unsupported_convention("day count", s)),
        }
    }
}

impl TryFrom<String> for DayCountConvention {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayCountConvention> for String {
    fn from(value: DayCountConvention) -> Self {
        value.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            "ACTUAL_365".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act365Fixed
        );
        assert_eq!(
            "act/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act360
        );
        assert_eq!(
            "30/360 US".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360US
        );
        assert_eq!(
            "Actual/Actual ISDA".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::ActActIsda
        );
    }

    #[test]
    fn test_parse_unknown_is_unsupported() {
        let err = "ACT/999".parse::<DayCountConvention>().unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnsupportedConvention { kind: "day count", .. }
        ));
    }

    #[test]
    fn test_names_round_trip() {
        for conv in DayCountConvention::all() {
            let parsed: DayCountConvention = conv.name().parse().unwrap();
            assert_eq!(parsed, *conv);
        }
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&DayCountConvention::Thirty360E).unwrap();
        assert_eq!(json, "\"30E/360\"");
        let parsed: DayCountConvention = serde_json::from_str("\"ACTUAL_360\"").unwrap();
        assert_eq!(parsed, DayCountConvention::Act360);
        assert!(serde_json::from_str::<DayCountConvention>("\"NL/365\"").is_err());
    }

    #[test]
    fn test_conventions_differ_on_same_span() {
        let start = date(2025, 1, 15);
        let end = date(2025, 7, 15);

        assert_eq!(DayCountConvention::Act360.year_fraction(start, end), dec!(181) / dec!(360));
        assert_eq!(
            DayCountConvention::Act365Fixed.year_fraction(start, end),
            dec!(181) / dec!(365)
        );
        assert_eq!(
            DayCountConvention::Thirty360US.year_fraction(start, end),
            dec!(0.5)
        );
    }

    proptest! {
        #[test]
        fn prop_act365_exact_for_365_days(offset in 0i64..40_000) {
            let start = date(1990, 1, 1).add_days(offset);
            let end = start.add_days(365);
            prop_assert_eq!(
                DayCountConvention::Act365Fixed.year_fraction(start, end),
                Decimal::ONE
            );
        }

        #[test]
        fn prop_thirty360_first_to_first_is_one_twelfth(year in 1980i32..2090, month in 1u32..=12) {
            let start = date(year, month, 1);
            let end = start.add_months(1).unwrap();
            let twelfth = Decimal::ONE / Decimal::from(12);
            prop_assert_eq!(DayCountConvention::Thirty360US.year_fraction(start, end), twelfth);
            prop_assert_eq!(DayCountConvention::Thirty360E.year_fraction(start, end), twelfth);
        }

        #[test]
        fn prop_actact_whole_calendar_year_is_one(year in 1971i32..2099) {
            let start = date(year, 1, 1);
            let end = date(year + 1, 1, 1);
            prop_assert_eq!(DayCountConvention::ActActIsda.year_fraction(start, end), Decimal::ONE);
        }
    }
}
