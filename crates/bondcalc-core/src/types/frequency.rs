//! Frequency and compounding types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::normalize_token;
use crate::error::CoreError;

/// Coupon payment frequency.
///
/// Only frequencies that divide a year into whole months are representable,
/// so every schedule built from a `Frequency` tiles the year exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year) - most common for US bonds
    #[default]
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Monthly payments (12 per year)
    Monthly,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Returns the number of months per period.
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }

    /// Builds a frequency from a payments-per-year count.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnsupportedConvention` for counts other than
    /// 1, 2, 4 or 12.
    pub fn from_periods_per_year(periods: u32) -> Result<Self, CoreError> {
        match periods {
            1 => Ok(Frequency::Annual),
            2 => Ok(Frequency::SemiAnnual),
            4 => Ok(Frequency::Quarterly),
            12 => Ok(Frequency::Monthly),
            other => Err(CoreError::unsupported_convention(
                "frequency",
                format!("{other} payments per year"),
            )),
        }
    }

    /// Returns the canonical name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Annual => "ANNUAL",
            Frequency::SemiAnnual => "SEMI_ANNUAL",
            Frequency::Quarterly => "QUARTERLY",
            Frequency::Monthly => "MONTHLY",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "ANNUAL" | "1" => Ok(Frequency::Annual),
            "SEMI_ANNUAL" | "SEMIANNUAL" | "2" => Ok(Frequency::SemiAnnual),
            "QUARTERLY" | "4" => Ok(Frequency::Quarterly),
            "MONTHLY" | "12" => Ok(Frequency::Monthly),
            _ => Err(CoreError::unsupported_convention("frequency", s)),
        }
    }
}

impl TryFrom<String> for Frequency {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Frequency> for String {
    fn from(value: Frequency) -> Self {
        value.name().to_string()
    }
}

/// How a yield compounds over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum CompoundingRule {
    /// Simple interest: `1 + y·t`
    Simple,
    /// Periodic compounding: `(1 + y/f)^(f·t)`
    #[default]
    Compounded,
    /// Continuous compounding: `e^(y·t)`
    Continuous,
    /// Simple up to one compounding period, compounded afterwards.
    SimpleThenCompounded,
    /// Compounded up to one compounding period, simple afterwards.
    CompoundedThenSimple,
}

impl CompoundingRule {
    /// Returns the canonical name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CompoundingRule::Simple => "SIMPLE",
            CompoundingRule::Compounded => "COMPOUNDED",
            CompoundingRule::Continuous => "CONTINUOUS",
            CompoundingRule::SimpleThenCompounded => "SIMPLE_THEN_COMPOUNDED",
            CompoundingRule::CompoundedThenSimple => "COMPOUNDED_THEN_SIMPLE",
        }
    }
}

impl fmt::Display for CompoundingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CompoundingRule {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "SIMPLE" => Ok(CompoundingRule::Simple),
            "COMPOUNDED" | "PERIODIC" => Ok(CompoundingRule::Compounded),
            "CONTINUOUS" => Ok(CompoundingRule::Continuous),
            "SIMPLE_THEN_COMPOUNDED" | "SIMPLETHENCOMPOUNDED" => {
                Ok(CompoundingRule::SimpleThenCompounded)
            }
            "COMPOUNDED_THEN_SIMPLE" | "COMPOUNDEDTHENSIMPLE" => {
                Ok(CompoundingRule::CompoundedThenSimple)
            }
            _ => Err(CoreError::unsupported_convention("compounding", s)),
        }
    }
}

impl TryFrom<String> for CompoundingRule {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CompoundingRule> for String {
    fn from(value: CompoundingRule) -> Self {
        value.name().to_string()
    }
}

/// A compounding rule paired with its compounding frequency.
///
/// The compounding frequency is independent of the coupon frequency: a
/// quarterly-paying bond may be quoted on an annually compounded yield.
///
/// # Example
///
/// ```rust
/// use bondcalc_core::types::{Compounding, Frequency};
///
/// let semi = Compounding::compounded(Frequency::SemiAnnual);
/// let df = semi.discount_factor(0.05, 1.0);
/// assert!((df - 1.0 / 1.025_f64.powi(2)).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Compounding {
    /// Compounding rule.
    pub rule: CompoundingRule,
    /// Compounding frequency (ignored by `Simple` and `Continuous`).
    #[serde(default)]
    pub frequency: Frequency,
}

impl Compounding {
    /// Creates a compounding convention.
    #[must_use]
    pub fn new(rule: CompoundingRule, frequency: Frequency) -> Self {
        Self { rule, frequency }
    }

    /// Periodic compounding at the given frequency.
    #[must_use]
    pub fn compounded(frequency: Frequency) -> Self {
        Self::new(CompoundingRule::Compounded, frequency)
    }

    /// Continuous compounding.
    #[must_use]
    pub fn continuous() -> Self {
        Self::new(CompoundingRule::Continuous, Frequency::Annual)
    }

    /// Simple interest.
    #[must_use]
    pub fn simple() -> Self {
        Self::new(CompoundingRule::Simple, Frequency::Annual)
    }

    /// Returns true if this is continuous compounding.
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        matches!(self.rule, CompoundingRule::Continuous)
    }

    /// Discount factor for time `t` (years) at yield `y`.
    #[must_use]
    pub fn discount_factor(&self, y: f64, t: f64) -> f64 {
        let f = self.periods();
        match self.effective_rule(t) {
            CompoundingRule::Simple => 1.0 / (1.0 + y * t),
            CompoundingRule::Continuous => (-y * t).exp(),
            _ => (1.0 + y / f).powf(-f * t),
        }
    }

    /// Derivative of [`Compounding::discount_factor`] with respect to `y`.
    #[must_use]
    pub fn discount_factor_derivative(&self, y: f64, t: f64) -> f64 {
        let f = self.periods();
        match self.effective_rule(t) {
            CompoundingRule::Simple => {
                let base = 1.0 + y * t;
                -t / (base * base)
            }
            CompoundingRule::Continuous => -t * (-y * t).exp(),
            _ => -t * (1.0 + y / f).powf(-f * t - 1.0),
        }
    }

    /// Rate under this convention that gives discount factor `df` at time
    /// `t`; the inverse of [`Compounding::discount_factor`].
    ///
    /// Returns 0 for a non-positive `t` or `df`.
    #[must_use]
    pub fn zero_rate(&self, df: f64, t: f64) -> f64 {
        if t <= 0.0 || df <= 0.0 {
            return 0.0;
        }
        let f = self.periods();
        match self.effective_rule(t) {
            CompoundingRule::Simple => (1.0 / df - 1.0) / t,
            CompoundingRule::Continuous => -df.ln() / t,
            _ => f * (df.powf(-1.0 / (f * t)) - 1.0),
        }
    }

    /// Returns true if `y` keeps the discount factor at time `t` finite and
    /// positive.
    #[must_use]
    pub fn is_valid_yield(&self, y: f64, t: f64) -> bool {
        if !y.is_finite() {
            return false;
        }
        match self.effective_rule(t) {
            CompoundingRule::Simple => 1.0 + y * t > 0.0,
            CompoundingRule::Continuous => true,
            _ => 1.0 + y / self.periods() > 0.0,
        }
    }

    /// Collapses the hybrid rules to the plain rule that applies at `t`.
    fn effective_rule(&self, t: f64) -> CompoundingRule {
        let first_period = t <= 1.0 / self.periods();
        match self.rule {
            CompoundingRule::SimpleThenCompounded if first_period => CompoundingRule::Simple,
            CompoundingRule::SimpleThenCompounded => CompoundingRule::Compounded,
            CompoundingRule::CompoundedThenSimple if first_period => CompoundingRule::Compounded,
            CompoundingRule::CompoundedThenSimple => CompoundingRule::Simple,
            rule => rule,
        }
    }

    fn periods(&self) -> f64 {
        f64::from(self.frequency.periods_per_year())
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rule {
            CompoundingRule::Simple | CompoundingRule::Continuous => write!(f, "{}", self.rule),
            _ => write!(f, "{} {}", self.rule, self.frequency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frequency_periods() {
        assert_eq!(Frequency::Annual.periods_per_year(), 1);
        assert_eq!(Frequency::SemiAnnual.periods_per_year(), 2);
        assert_eq!(Frequency::Quarterly.months_per_period(), 3);
        assert_eq!(Frequency::Monthly.months_per_period(), 1);
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!("semi-annual".parse::<Frequency>().unwrap(), Frequency::SemiAnnual);
        assert_eq!("SEMIANNUAL".parse::<Frequency>().unwrap(), Frequency::SemiAnnual);
        assert_eq!("4".parse::<Frequency>().unwrap(), Frequency::Quarterly);
        assert!("WEEKLY".parse::<Frequency>().is_err());
        assert!(Frequency::from_periods_per_year(5).is_err());
        assert_eq!(Frequency::from_periods_per_year(12).unwrap(), Frequency::Monthly);
    }

    #[test]
    fn test_compounding_rule_parse() {
        assert_eq!(
            "simple then compounded".parse::<CompoundingRule>().unwrap(),
            CompoundingRule::SimpleThenCompounded
        );
        let err = "DAILY".parse::<CompoundingRule>().unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedConvention { .. }));
    }

    #[test]
    fn test_discount_factors() {
        let y = 0.06;
        let t = 2.0;
        assert_relative_eq!(Compounding::simple().discount_factor(y, t), 1.0 / 1.12);
        assert_relative_eq!(
            Compounding::continuous().discount_factor(y, t),
            (-0.12_f64).exp()
        );
        assert_relative_eq!(
            Compounding::compounded(Frequency::Quarterly).discount_factor(y, t),
            1.015_f64.powi(-8),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_hybrid_rules_switch_after_first_period() {
        let sc = Compounding::new(CompoundingRule::SimpleThenCompounded, Frequency::SemiAnnual);
        assert_relative_eq!(sc.discount_factor(0.04, 0.25), 1.0 / 1.01);
        assert_relative_eq!(sc.discount_factor(0.04, 1.0), 1.02_f64.powi(-2), epsilon = 1e-14);

        let cs = Compounding::new(CompoundingRule::CompoundedThenSimple, Frequency::Annual);
        assert_relative_eq!(cs.discount_factor(0.04, 0.5), 1.04_f64.powf(-0.5));
        assert_relative_eq!(cs.discount_factor(0.04, 2.0), 1.0 / 1.08);
    }

    #[test]
    fn test_derivatives_match_finite_differences() {
        let h = 1e-6;
        for rule in [
            CompoundingRule::Simple,
            CompoundingRule::Compounded,
            CompoundingRule::Continuous,
            CompoundingRule::SimpleThenCompounded,
            CompoundingRule::CompoundedThenSimple,
        ] {
            let comp = Compounding::new(rule, Frequency::SemiAnnual);
            for t in [0.3, 1.7, 6.0] {
                let numeric = (comp.discount_factor(0.05 + h, t)
                    - comp.discount_factor(0.05 - h, t))
                    / (2.0 * h);
                assert_relative_eq!(
                    comp.discount_factor_derivative(0.05, t),
                    numeric,
                    max_relative = 1e-6
                );
            }
        }
    }

    #[test]
    fn test_zero_rate_inverts_discount_factor() {
        for rule in [
            CompoundingRule::Simple,
            CompoundingRule::Compounded,
            CompoundingRule::Continuous,
            CompoundingRule::SimpleThenCompounded,
            CompoundingRule::CompoundedThenSimple,
        ] {
            let comp = Compounding::new(rule, Frequency::Quarterly);
            for t in [0.1, 0.25, 3.5] {
                let df = comp.discount_factor(0.047, t);
                assert_relative_eq!(comp.zero_rate(df, t), 0.047, epsilon = 1e-12);
            }
        }
        assert_eq!(Compounding::continuous().zero_rate(0.9, 0.0), 0.0);
        assert_eq!(Compounding::simple().zero_rate(0.0, 1.0), 0.0);
    }

    #[test]
    fn test_yield_domain() {
        let semi = Compounding::compounded(Frequency::SemiAnnual);
        assert!(semi.is_valid_yield(-1.9, 5.0));
        assert!(!semi.is_valid_yield(-2.0, 5.0));
        assert!(!Compounding::simple().is_valid_yield(-0.5, 2.0));
        assert!(Compounding::continuous().is_valid_yield(-3.0, 2.0));
        assert!(!Compounding::continuous().is_valid_yield(f64::NAN, 2.0));
    }

    #[test]
    fn test_compounding_serde() {
        let comp = Compounding::compounded(Frequency::Annual);
        let json = serde_json::to_string(&comp).unwrap();
        assert_eq!(json, r#"{"rule":"COMPOUNDED","frequency":"ANNUAL"}"#);

        let parsed: Compounding = serde_json::from_str(r#"{"rule":"continuous"}"#).unwrap();
        assert!(parsed.is_continuous());
        assert_eq!(parsed.frequency, Frequency::SemiAnnual);
    }
}
