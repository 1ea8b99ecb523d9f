//! Invariant checks for bond terms.

use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fmt;

use super::terms::{BondTerms, BondVariant, ExerciseEntry, RateReset, SinkingEntry};
use crate::error::{BondError, BondResult};

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Trait for descriptions that can check their own invariants.
pub trait Validate {
    /// Returns every violated invariant, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if there are no validation errors.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and reports any violations as [`BondError::InvalidTerms`].
    ///
    /// The error reason lists the messages in the order they were found.
    fn validate_or_error(&self) -> BondResult<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let reason = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Err(BondError::invalid_terms(reason))
    }
}

impl Validate for BondTerms {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.face_value <= Decimal::ZERO {
            errors.push(ValidationError::new(
                "face_value",
                "Face value must be positive",
            ));
        }

        if self.maturity_date <= self.issue_date {
            errors.push(ValidationError::new(
                "maturity_date",
                "Maturity date must be after issue date",
            ));
        }

        if let Some(settlement) = self.settlement_date {
            if settlement < self.issue_date {
                errors.push(ValidationError::new(
                    "settlement_date",
                    "Settlement date cannot be before issue date",
                ));
            } else if settlement > self.maturity_date {
                errors.push(ValidationError::new(
                    "settlement_date",
                    "Evaluation date is after maturity date",
                ));
            } else if settlement == self.maturity_date {
                errors.push(ValidationError::new(
                    "settlement_date",
                    "No future cash flows: settlement is on the maturity date",
                ));
            }
        }

        if let Some(price) = self.market_price {
            if price <= Decimal::ZERO {
                errors.push(ValidationError::new(
                    "market_price",
                    "Market price must be positive",
                ));
            }
        }

        if let Some(y) = self.quoted_yield {
            if !y.is_finite() {
                errors.push(ValidationError::new(
                    "quoted_yield",
                    "Quoted yield must be a finite number",
                ));
            }
        }

        if let Some(rate) = self.variant.coupon_rate() {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                errors.push(ValidationError::with_rule(
                    "variant.coupon_rate",
                    "Coupon rate must be between 0 and 1 (0% to 100%)",
                    "valid_coupon_rate",
                ));
            }
        }

        match &self.variant {
            BondVariant::Callable { call_schedule, .. } => {
                self.check_exercises(call_schedule, "call_schedule", "Call", &mut errors);
            }
            BondVariant::Putable { put_schedule, .. } => {
                self.check_exercises(put_schedule, "put_schedule", "Put", &mut errors);
            }
            BondVariant::SinkingFund {
                sinking_schedule, ..
            } => self.check_sinking(sinking_schedule, &mut errors),
            BondVariant::Floating {
                resets, cap, floor, ..
            } => check_floating(resets, *cap, *floor, &mut errors),
            BondVariant::ZeroCoupon | BondVariant::FixedCoupon { .. } => {}
        }

        errors
    }
}

impl BondTerms {
    fn check_exercises(
        &self,
        entries: &[ExerciseEntry],
        field: &str,
        label: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        let field = format!("variant.{field}");

        if entries
            .iter()
            .any(|e| e.date <= self.issue_date || e.date >= self.maturity_date)
        {
            errors.push(ValidationError::new(
                &field,
                format!("{label} date must be between issue and maturity dates"),
            ));
        }

        if entries.windows(2).any(|w| w[0].date >= w[1].date) {
            errors.push(ValidationError::new(
                &field,
                format!("{label} dates must be strictly increasing"),
            ));
        }

        if entries.iter().any(|e| e.price <= Decimal::ZERO) {
            errors.push(ValidationError::new(
                &field,
                format!("{label} price must be positive"),
            ));
        }
    }

    fn check_sinking(&self, entries: &[SinkingEntry], errors: &mut Vec<ValidationError>) {
        const FIELD: &str = "variant.sinking_schedule";

        if entries
            .iter()
            .any(|e| e.date <= self.issue_date || e.date > self.maturity_date)
        {
            errors.push(ValidationError::new(
                FIELD,
                "Sinking fund date must be after issue date and on or before maturity date",
            ));
        }

        let mut seen = HashSet::new();
        if !entries.iter().all(|e| seen.insert(e.date)) {
            errors.push(ValidationError::new(
                FIELD,
                "Duplicate dates in sinking schedule",
            ));
        }

        if entries.iter().any(|e| e.amount <= Decimal::ZERO) {
            errors.push(ValidationError::new(
                FIELD,
                "Sinking fund amount must be positive",
            ));
        }

        let total: Decimal = entries.iter().map(|e| e.amount).sum();
        if total > self.face_value {
            errors.push(ValidationError::with_rule(
                FIELD,
                format!(
                    "Total sinking payments ({total}) exceed face value ({})",
                    self.face_value
                ),
                "max_sinking_total",
            ));
        }
    }
}

fn check_floating(
    resets: &[RateReset],
    cap: Option<Decimal>,
    floor: Option<Decimal>,
    errors: &mut Vec<ValidationError>,
) {
    if resets.windows(2).any(|w| w[0].reset_date >= w[1].reset_date) {
        errors.push(ValidationError::new(
            "variant.resets",
            "Reset dates must be strictly increasing",
        ));
    }

    if let (Some(cap), Some(floor)) = (cap, floor) {
        if cap < floor {
            errors.push(ValidationError::new(
                "variant.cap",
                "Cap must not be below floor",
            ));
        }
    }
}
