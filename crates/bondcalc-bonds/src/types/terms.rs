//! Bond terms and the variant union.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use bondcalc_core::calendars::{BusinessDayConvention, CalendarId};
use bondcalc_core::daycounts::DayCountConvention;
use bondcalc_core::types::{Compounding, CompoundingRule, Date, Frequency};
use bondcalc_core::CoreError;

use crate::error::{BondError, BondResult};

/// Settlement lag applied when a description does not carry one.
pub const DEFAULT_SETTLEMENT_DAYS: u32 = 2;

/// Discriminant of [`BondVariant`], used for dispatch and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BondKind {
    /// Single principal payment at maturity.
    ZeroCoupon,
    /// Fixed periodic coupons.
    FixedCoupon,
    /// Fixed coupons, redeemable early by the issuer.
    Callable,
    /// Fixed coupons, redeemable early by the holder.
    Putable,
    /// Coupons set from index fixings plus a spread.
    Floating,
    /// Fixed coupons on a notional retired on a schedule.
    SinkingFund,
}

impl BondKind {
    /// Returns the tag used in bond descriptions.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            BondKind::ZeroCoupon => "ZeroCoupon",
            BondKind::FixedCoupon => "FixedCoupon",
            BondKind::Callable => "Callable",
            BondKind::Putable => "Putable",
            BondKind::Floating => "Floating",
            BondKind::SinkingFund => "SinkingFund",
        }
    }

    /// Returns all supported bond kinds.
    #[must_use]
    pub fn all() -> &'static [BondKind] {
        &[
            BondKind::ZeroCoupon,
            BondKind::FixedCoupon,
            BondKind::Callable,
            BondKind::Putable,
            BondKind::Floating,
            BondKind::SinkingFund,
        ]
    }

    /// Returns true for bonds with an early-exercise schedule.
    #[must_use]
    pub fn has_exercise_schedule(&self) -> bool {
        matches!(self, BondKind::Callable | BondKind::Putable)
    }
}

impl fmt::Display for BondKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BondKind {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BondKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| BondError::unsupported_bond_type(s))
    }
}

/// One call or put date with its exercise price.
///
/// The price is in the same currency units as the face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    /// Exercise date.
    pub date: Date,
    /// Exercise price.
    pub price: Decimal,
}

impl ExerciseEntry {
    /// Creates an exercise entry.
    #[must_use]
    pub fn new(date: Date, price: Decimal) -> Self {
        Self { date, price }
    }
}

/// One partial redemption of a sinking-fund bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkingEntry {
    /// Date the notional is retired.
    pub date: Date,
    /// Notional retired.
    pub amount: Decimal,
}

impl SinkingEntry {
    /// Creates a sinking-fund entry.
    #[must_use]
    pub fn new(date: Date, amount: Decimal) -> Self {
        Self { date, amount }
    }
}

/// A floating-rate reset: the index observed on `reset_date`.
///
/// Index fixings are external data, so the caller supplies either the
/// observed `fixing` or an `override_rate`. The override wins when both
/// are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateReset {
    /// Date the index is observed.
    pub reset_date: Date,
    /// Index name (e.g. "SOFR").
    #[serde(default)]
    pub index: String,
    /// Observed index fixing.
    #[serde(default)]
    pub fixing: Option<Decimal>,
    /// Rate replacing the fixing.
    #[serde(default, rename = "override")]
    pub override_rate: Option<Decimal>,
}

impl RateReset {
    /// Creates a reset with no rate supplied yet.
    #[must_use]
    pub fn new(reset_date: Date, index: impl Into<String>) -> Self {
        Self {
            reset_date,
            index: index.into(),
            fixing: None,
            override_rate: None,
        }
    }

    /// Sets the observed fixing.
    #[must_use]
    pub fn with_fixing(mut self, fixing: Decimal) -> Self {
        self.fixing = Some(fixing);
        self
    }

    /// Sets the override rate.
    #[must_use]
    pub fn with_override(mut self, rate: Decimal) -> Self {
        self.override_rate = Some(rate);
        self
    }

    /// Returns the rate this reset contributes, if any.
    #[must_use]
    pub fn effective_rate(&self) -> Option<Decimal> {
        self.override_rate.or(self.fixing)
    }
}

/// The structure of a bond, tagged by `type` in bond descriptions.
///
/// ```json
/// { "type": "Callable", "coupon_rate": 0.05, "frequency": "SEMI_ANNUAL",
///   "call_schedule": [{ "date": "2028-01-15", "price": 1010 }] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BondVariant {
    /// Single principal payment at maturity.
    ZeroCoupon,

    /// Fixed periodic coupons.
    FixedCoupon {
        /// Annual coupon rate (0.05 = 5%).
        coupon_rate: Decimal,
        /// Coupon frequency.
        #[serde(default)]
        frequency: Frequency,
    },

    /// Fixed coupons with issuer call dates.
    Callable {
        /// Annual coupon rate.
        coupon_rate: Decimal,
        /// Coupon frequency.
        #[serde(default)]
        frequency: Frequency,
        /// Call dates and prices, in date order.
        call_schedule: Vec<ExerciseEntry>,
    },

    /// Fixed coupons with holder put dates.
    Putable {
        /// Annual coupon rate.
        coupon_rate: Decimal,
        /// Coupon frequency.
        #[serde(default)]
        frequency: Frequency,
        /// Put dates and prices, in date order.
        put_schedule: Vec<ExerciseEntry>,
    },

    /// Index-linked coupons.
    Floating {
        /// Spread over the index (0.01 = 100bp).
        #[serde(default)]
        spread: Decimal,
        /// Coupon frequency.
        #[serde(default)]
        frequency: Frequency,
        /// Reset schedule, in date order.
        resets: Vec<RateReset>,
        /// Maximum coupon rate.
        #[serde(default)]
        cap: Option<Decimal>,
        /// Minimum coupon rate.
        #[serde(default)]
        floor: Option<Decimal>,
    },

    /// Fixed coupons on an amortizing notional.
    SinkingFund {
        /// Annual coupon rate.
        coupon_rate: Decimal,
        /// Coupon frequency.
        #[serde(default)]
        frequency: Frequency,
        /// Partial redemptions, in date order.
        sinking_schedule: Vec<SinkingEntry>,
    },
}

impl BondVariant {
    /// Zero-coupon bond.
    #[must_use]
    pub fn zero_coupon() -> Self {
        BondVariant::ZeroCoupon
    }

    /// Fixed-coupon bond.
    #[must_use]
    pub fn fixed(coupon_rate: Decimal, frequency: Frequency) -> Self {
        BondVariant::FixedCoupon {
            coupon_rate,
            frequency,
        }
    }

    /// Callable bond.
    #[must_use]
    pub fn callable(coupon_rate: Decimal, frequency: Frequency, calls: Vec<ExerciseEntry>) -> Self {
        BondVariant::Callable {
            coupon_rate,
            frequency,
            call_schedule: calls,
        }
    }

    /// Putable bond.
    #[must_use]
    pub fn putable(coupon_rate: Decimal, frequency: Frequency, puts: Vec<ExerciseEntry>) -> Self {
        BondVariant::Putable {
            coupon_rate,
            frequency,
            put_schedule: puts,
        }
    }

    /// Floating-rate bond without cap or floor.
    #[must_use]
    pub fn floating(spread: Decimal, frequency: Frequency, resets: Vec<RateReset>) -> Self {
        BondVariant::Floating {
            spread,
            frequency,
            resets,
            cap: None,
            floor: None,
        }
    }

    /// Sinking-fund bond.
    #[must_use]
    pub fn sinking_fund(
        coupon_rate: Decimal,
        frequency: Frequency,
        sinking_schedule: Vec<SinkingEntry>,
    ) -> Self {
        BondVariant::SinkingFund {
            coupon_rate,
            frequency,
            sinking_schedule,
        }
    }

    /// Returns the discriminant.
    #[must_use]
    pub fn kind(&self) -> BondKind {
        match self {
            BondVariant::ZeroCoupon => BondKind::ZeroCoupon,
            BondVariant::FixedCoupon { .. } => BondKind::FixedCoupon,
            BondVariant::Callable { .. } => BondKind::Callable,
            BondVariant::Putable { .. } => BondKind::Putable,
            BondVariant::Floating { .. } => BondKind::Floating,
            BondVariant::SinkingFund { .. } => BondKind::SinkingFund,
        }
    }

    /// Returns the fixed coupon rate, if the bond has one.
    #[must_use]
    pub fn coupon_rate(&self) -> Option<Decimal> {
        match self {
            BondVariant::FixedCoupon { coupon_rate, .. }
            | BondVariant::Callable { coupon_rate, .. }
            | BondVariant::Putable { coupon_rate, .. }
            | BondVariant::SinkingFund { coupon_rate, .. } => Some(*coupon_rate),
            BondVariant::ZeroCoupon | BondVariant::Floating { .. } => None,
        }
    }

    /// Returns the coupon frequency, if the bond pays coupons.
    #[must_use]
    pub fn coupon_frequency(&self) -> Option<Frequency> {
        match self {
            BondVariant::ZeroCoupon => None,
            BondVariant::FixedCoupon { frequency, .. }
            | BondVariant::Callable { frequency, .. }
            | BondVariant::Putable { frequency, .. }
            | BondVariant::Floating { frequency, .. }
            | BondVariant::SinkingFund { frequency, .. } => Some(*frequency),
        }
    }

    /// Returns the call or put schedule.
    #[must_use]
    pub fn exercise_schedule(&self) -> Option<&[ExerciseEntry]> {
        match self {
            BondVariant::Callable { call_schedule, .. } => Some(call_schedule),
            BondVariant::Putable { put_schedule, .. } => Some(put_schedule),
            _ => None,
        }
    }
}

/// Economic terms of a bond.
///
/// All prices (market price, call and put prices) are in the currency units
/// of `face_value`: a 1000 face bond quoted at 95% has a market price of 950.
/// The market price is clean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondTerms {
    /// Bond identifier.
    pub bond_id: String,
    /// Bond structure.
    pub variant: BondVariant,
    /// Face value.
    pub face_value: Decimal,
    /// Issue date (start of the first accrual period).
    pub issue_date: Date,
    /// Maturity date (final principal payment).
    pub maturity_date: Date,
    /// Explicit settlement date; derived from the analytics date if absent.
    #[serde(default)]
    pub settlement_date: Option<Date>,
    /// Business days between the analytics date and settlement.
    #[serde(default = "default_settlement_days")]
    pub settlement_days: u32,
    /// Day count used for accrual and discounting.
    #[serde(default)]
    pub day_count: DayCountConvention,
    /// Yield compounding convention.
    #[serde(default)]
    pub compounding: Compounding,
    /// Holiday calendar.
    #[serde(default)]
    pub calendar: CalendarId,
    /// Business-day adjustment rule.
    #[serde(default)]
    pub business_day_convention: BusinessDayConvention,
    /// Clean market price.
    #[serde(default)]
    pub market_price: Option<Decimal>,
    /// Quoted yield, used when no market price is available.
    #[serde(default)]
    pub quoted_yield: Option<f64>,
}

fn default_settlement_days() -> u32 {
    DEFAULT_SETTLEMENT_DAYS
}

impl BondTerms {
    /// Creates terms with default conventions: ACT/365F, semi-annual
    /// compounding, TARGET calendar, following adjustment, T+2.
    #[must_use]
    pub fn new(
        bond_id: impl Into<String>,
        variant: BondVariant,
        face_value: Decimal,
        issue_date: Date,
        maturity_date: Date,
    ) -> Self {
        Self {
            bond_id: bond_id.into(),
            variant,
            face_value,
            issue_date,
            maturity_date,
            settlement_date: None,
            settlement_days: DEFAULT_SETTLEMENT_DAYS,
            day_count: DayCountConvention::default(),
            compounding: Compounding::default(),
            calendar: CalendarId::default(),
            business_day_convention: BusinessDayConvention::default(),
            market_price: None,
            quoted_yield: None,
        }
    }

    /// Parses a bond description from JSON.
    ///
    /// Convention names are checked before the full document so that a bad
    /// name is reported as a convention or configuration error rather than a
    /// generic parse failure.
    ///
    /// # Errors
    ///
    /// - [`BondError::UnsupportedBondType`] for an unknown `variant.type`
    /// - [`BondError::Core`] for unknown day counts, compounding rules,
    ///   calendars or business-day rules
    /// - [`BondError::InvalidTerms`] for anything else that does not parse
    pub fn from_json(json: &str) -> BondResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| BondError::invalid_terms(format!("malformed bond description: {e}")))?;

        let tag = value
            .pointer("/variant/type")
            .and_then(Value::as_str)
            .ok_or_else(|| BondError::invalid_terms("variant.type is required"))?;
        tag.parse::<BondKind>()?;

        if let Some(days) = value.get("settlement_days") {
            if !days.is_null() && days.as_u64().and_then(|d| u32::try_from(d).ok()).is_none() {
                return Err(BondError::invalid_terms(
                    "Settlement days must be a non-negative integer",
                ));
            }
        }

        check_name::<DayCountConvention>(&value, "/day_count")?;
        check_name::<CompoundingRule>(&value, "/compounding/rule")?;
        check_name::<Frequency>(&value, "/compounding/frequency")?;
        check_name::<Frequency>(&value, "/variant/frequency")?;
        check_name::<CalendarId>(&value, "/calendar")?;
        check_name::<BusinessDayConvention>(&value, "/business_day_convention")?;

        serde_json::from_value(value).map_err(|e| BondError::invalid_terms(e.to_string()))
    }

    /// Sets an explicit settlement date.
    #[must_use]
    pub fn with_settlement_date(mut self, date: Date) -> Self {
        self.settlement_date = Some(date);
        self
    }

    /// Sets the settlement lag in business days.
    #[must_use]
    pub fn with_settlement_days(mut self, days: u32) -> Self {
        self.settlement_days = days;
        self
    }

    /// Sets the day count convention.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets the compounding convention.
    #[must_use]
    pub fn with_compounding(mut self, compounding: Compounding) -> Self {
        self.compounding = compounding;
        self
    }

    /// Sets the holiday calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarId) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the business-day adjustment rule.
    #[must_use]
    pub fn with_business_day_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.business_day_convention = convention;
        self
    }

    /// Sets the clean market price.
    #[must_use]
    pub fn with_market_price(mut self, price: Decimal) -> Self {
        self.market_price = Some(price);
        self
    }

    /// Sets the quoted yield.
    #[must_use]
    pub fn with_quoted_yield(mut self, yield_value: f64) -> Self {
        self.quoted_yield = Some(yield_value);
        self
    }

    /// Returns the bond kind.
    #[must_use]
    pub fn kind(&self) -> BondKind {
        self.variant.kind()
    }

    /// Frequency used for duration and convexity: the coupon frequency, or
    /// the compounding frequency for zero-coupon bonds.
    #[must_use]
    pub fn risk_frequency(&self) -> Frequency {
        self.variant
            .coupon_frequency()
            .unwrap_or(self.compounding.frequency)
    }
}

/// Parses the string at `pointer`, if present, as a convention name.
fn check_name<T>(value: &Value, pointer: &str) -> BondResult<()>
where
    T: FromStr<Err = CoreError>,
{
    if let Some(name) = value.pointer(pointer).and_then(Value::as_str) {
        name.parse::<T>()?;
    }
    Ok(())
}
