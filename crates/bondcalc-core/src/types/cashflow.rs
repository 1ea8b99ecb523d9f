//! Cash flow types for bond analytics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;

/// Type of cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlowType {
    /// Fixed coupon.
    Coupon,
    /// Coupon set from an index fixing.
    FloatingCoupon,
    /// Last coupon together with the remaining principal.
    CouponAndPrincipal,
    /// Coupon with part of the principal retired.
    PartialPrincipal,
    /// Early exercise at a call or put price.
    Redemption,
}

impl fmt::Display for CashFlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashFlowType::Coupon => "Coupon",
            CashFlowType::FloatingCoupon => "Floating Coupon",
            CashFlowType::CouponAndPrincipal => "Coupon+Principal",
            CashFlowType::PartialPrincipal => "Partial Principal",
            CashFlowType::Redemption => "Redemption",
        };
        write!(f, "{name}")
    }
}

/// A dated cash flow with its coupon and principal components.
///
/// # Example
///
/// ```rust
/// use bondcalc_core::types::{CashFlow, Date};
/// use rust_decimal_macros::dec;
///
/// let cf = CashFlow::final_payment(
///     Date::from_ymd(2030, 6, 15).unwrap(),
///     dec!(25),
///     dec!(1000),
///     Date::from_ymd(2029, 12, 15).unwrap(),
/// );
/// assert_eq!(cf.amount(), dec!(1025));
/// assert!(cf.is_principal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlow {
    date: Date,
    coupon: Decimal,
    principal: Decimal,
    cf_type: CashFlowType,
    accrual_start: Date,
    accrual_end: Date,
    /// Fixing plus spread, after cap and floor; floating coupons only.
    reference_rate: Option<Decimal>,
    notional_after: Option<Decimal>,
}

impl CashFlow {
    /// Creates a coupon cash flow paid at the end of its accrual period.
    #[must_use]
    pub fn coupon(date: Date, amount: Decimal, accrual_start: Date) -> Self {
        Self {
            date,
            coupon: amount,
            principal: Decimal::ZERO,
            cf_type: CashFlowType::Coupon,
            accrual_start,
            accrual_end: date,
            reference_rate: None,
            notional_after: None,
        }
    }

    /// Creates a floating coupon cash flow.
    #[must_use]
    pub fn floating_coupon(
        date: Date,
        amount: Decimal,
        accrual_start: Date,
        reference_rate: Decimal,
    ) -> Self {
        Self {
            cf_type: CashFlowType::FloatingCoupon,
            reference_rate: Some(reference_rate),
            ..Self::coupon(date, amount, accrual_start)
        }
    }

    /// Creates a final cash flow (coupon + principal).
    #[must_use]
    pub fn final_payment(date: Date, coupon: Decimal, principal: Decimal, accrual_start: Date) -> Self {
        Self {
            principal,
            cf_type: CashFlowType::CouponAndPrincipal,
            notional_after: Some(Decimal::ZERO),
            ..Self::coupon(date, coupon, accrual_start)
        }
    }

    /// Creates an early redemption: coupon accrued to the exercise date plus
    /// the exercise price.
    #[must_use]
    pub fn redemption(date: Date, coupon: Decimal, price: Decimal, accrual_start: Date) -> Self {
        Self {
            principal: price,
            cf_type: CashFlowType::Redemption,
            notional_after: Some(Decimal::ZERO),
            ..Self::coupon(date, coupon, accrual_start)
        }
    }

    /// Adds a principal repayment to this cash flow.
    ///
    /// Coupons become [`CashFlowType::PartialPrincipal`] unless the
    /// remaining notional is zero, in which case they become the final payment.
    #[must_use]
    pub fn with_principal(mut self, principal: Decimal, notional_after: Decimal) -> Self {
        self.principal += principal;
        self.notional_after = Some(notional_after);
        if self.cf_type != CashFlowType::Redemption {
            self.cf_type = if notional_after.is_zero() {
                CashFlowType::CouponAndPrincipal
            } else {
                CashFlowType::PartialPrincipal
            };
        }
        self
    }

    /// Returns the payment date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the total cash flow amount.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.coupon + self.principal
    }

    /// Returns the interest component.
    #[must_use]
    pub fn coupon_amount(&self) -> Decimal {
        self.coupon
    }

    /// Returns the principal component.
    #[must_use]
    pub fn principal_amount(&self) -> Decimal {
        self.principal
    }

    /// Returns the cash flow type.
    #[must_use]
    pub fn cf_type(&self) -> CashFlowType {
        self.cf_type
    }

    /// Returns the accrual period start date.
    #[must_use]
    pub fn accrual_start(&self) -> Date {
        self.accrual_start
    }

    /// Returns the accrual period end date.
    #[must_use]
    pub fn accrual_end(&self) -> Date {
        self.accrual_end
    }

    /// Returns the coupon rate for the period, if recorded.
    #[must_use]
    pub fn reference_rate(&self) -> Option<Decimal> {
        self.reference_rate
    }

    /// Returns the remaining notional after this cash flow, if applicable.
    #[must_use]
    pub fn notional_after(&self) -> Option<Decimal> {
        self.notional_after
    }

    /// Returns true if this includes principal repayment.
    #[must_use]
    pub fn is_principal(&self) -> bool {
        !self.principal.is_zero()
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.date, self.amount(), self.cf_type)
    }
}

/// An ordered schedule of cash flows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    cash_flows: Vec<CashFlow>,
}

impl CashFlowSchedule {
    /// Creates a new empty cash flow schedule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cash_flows: Vec::new(),
        }
    }

    /// Creates a schedule with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cash_flows: Vec::with_capacity(capacity),
        }
    }

    /// Adds a cash flow to the schedule.
    pub fn push(&mut self, cf: CashFlow) {
        self.cash_flows.push(cf);
    }

    /// Returns the cash flows as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[CashFlow] {
        &self.cash_flows
    }

    /// Returns the number of cash flows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cash_flows.len()
    }

    /// Returns true if there are no cash flows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cash_flows.is_empty()
    }

    /// Returns an iterator over the cash flows.
    pub fn iter(&self) -> impl Iterator<Item = &CashFlow> {
        self.cash_flows.iter()
    }

    /// Returns the last cash flow, if any.
    #[must_use]
    pub fn last(&self) -> Option<&CashFlow> {
        self.cash_flows.last()
    }

    /// Returns the total of all principal repayments.
    #[must_use]
    pub fn total_principal(&self) -> Decimal {
        self.cash_flows.iter().map(|cf| cf.principal).sum()
    }

    /// Returns true if payment dates are strictly increasing.
    #[must_use]
    pub fn is_strictly_increasing(&self) -> bool {
        self.cash_flows.windows(2).all(|w| w[0].date < w[1].date)
    }
}

impl IntoIterator for CashFlowSchedule {
    type Item = CashFlow;
    type IntoIter = std::vec::IntoIter<CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.cash_flows.into_iter()
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a CashFlow;
    type IntoIter = std::slice::Iter<'a, CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.cash_flows.iter()
    }
}

impl FromIterator<CashFlow> for CashFlowSchedule {
    fn from_iter<I: IntoIterator<Item = CashFlow>>(iter: I) -> Self {
        Self {
            cash_flows: iter.into_iter().collect(),
        }
    }
}
