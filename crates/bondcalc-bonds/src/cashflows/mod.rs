//! Cash flow generation for bonds.
//!
//! - [`Schedule`]: coupon periods from issue to maturity
//! - [`CashFlowGenerator`]: forward cash flows per bond variant
//! - [`resolve_settlement`]: settlement date from an analytics date
//! - [`accrued_interest`]: coupon accrued to settlement
//! - [`truncate_at_exercise`]: cash flows to a call or put date

mod accrued;
mod exercise;
mod floating;
mod schedule;
mod settlement;

pub use accrued::accrued_interest;
pub use exercise::truncate_at_exercise;
pub use floating::FloatingLeg;
pub use schedule::{CouponPeriod, Schedule, ScheduleConfig};
pub use settlement::resolve_settlement;

use log::debug;
use rust_decimal::Decimal;

use bondcalc_core::types::{CashFlow, CashFlowSchedule, Date, Frequency};

use crate::error::BondResult;
use crate::types::{BondTerms, BondVariant, SinkingEntry};

/// Generates cash flows for bonds.
pub struct CashFlowGenerator;

impl CashFlowGenerator {
    /// Generates the cash flows paid strictly after `settlement`.
    ///
    /// A coupon paid on the settlement date belongs to the seller and is
    /// excluded. Each flow keeps its accrual period so accrued interest can be
    /// computed from the first one.
    ///
    /// # Errors
    ///
    /// Returns `BondError::MissingRateFixing` for a floating period without a
    /// fixing, and propagates schedule errors.
    pub fn generate(terms: &BondTerms, settlement: Date) -> BondResult<CashFlowSchedule> {
        let flows = match &terms.variant {
            BondVariant::ZeroCoupon => std::iter::once(CashFlow::final_payment(
                terms.maturity_date,
                Decimal::ZERO,
                terms.face_value,
                terms.issue_date,
            ))
            .filter(|cf| cf.date() > settlement)
            .collect(),

            BondVariant::FixedCoupon {
                coupon_rate,
                frequency,
            }
            | BondVariant::Callable {
                coupon_rate,
                frequency,
                ..
            }
            | BondVariant::Putable {
                coupon_rate,
                frequency,
                ..
            } => Self::fixed(terms, *coupon_rate, *frequency, settlement)?,

            BondVariant::Floating {
                spread,
                frequency,
                resets,
                cap,
                floor,
            } => {
                let leg = FloatingLeg {
                    resets,
                    spread: *spread,
                    cap: *cap,
                    floor: *floor,
                };
                Self::floating(terms, &leg, *frequency, settlement)?
            }

            BondVariant::SinkingFund {
                coupon_rate,
                frequency,
                sinking_schedule,
            } => Self::sinking_fund(terms, *coupon_rate, *frequency, sinking_schedule, settlement)?,
        };

        debug!(
            "generated {} cash flows for {} ({}) after {}",
            flows.len(),
            terms.bond_id,
            terms.kind(),
            settlement
        );

        Ok(flows)
    }

    /// Generates the coupon periods of a coupon-bearing bond.
    pub fn schedule(terms: &BondTerms, frequency: Frequency) -> BondResult<Schedule> {
        let config = ScheduleConfig::new(terms.issue_date, terms.maturity_date, frequency)
            .with_calendar(terms.calendar)
            .with_business_day_convention(terms.business_day_convention);
        Schedule::generate(&config)
    }

    fn fixed(
        terms: &BondTerms,
        coupon_rate: Decimal,
        frequency: Frequency,
        settlement: Date,
    ) -> BondResult<CashFlowSchedule> {
        let schedule = Self::schedule(terms, frequency)?;
        let regular = terms.face_value * coupon_rate / Decimal::from(frequency.periods_per_year());
        let last = schedule.len().saturating_sub(1);

        let flows = schedule
            .periods()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.payment_date() > settlement)
            .map(|(i, p)| {
                let coupon = regular * p.coupon_fraction(terms.day_count);
                if i == last {
                    CashFlow::final_payment(p.payment_date(), coupon, terms.face_value, p.accrual_start)
                } else {
                    CashFlow::coupon(p.payment_date(), coupon, p.accrual_start)
                }
            })
            .collect();

        Ok(flows)
    }

    fn floating(
        terms: &BondTerms,
        leg: &FloatingLeg<'_>,
        frequency: Frequency,
        settlement: Date,
    ) -> BondResult<CashFlowSchedule> {
        let schedule = Self::schedule(terms, frequency)?;
        let periods_per_year = Decimal::from(frequency.periods_per_year());
        let last = schedule.len().saturating_sub(1);

        let mut flows = CashFlowSchedule::with_capacity(schedule.len());
        for (i, period) in schedule.periods().iter().enumerate() {
            if period.payment_date() <= settlement {
                continue;
            }
            let rate = leg.rate_for(period.accrual_start)?;
            let coupon = terms.face_value * rate / periods_per_year
                * period.coupon_fraction(terms.day_count);
            let mut cf =
                CashFlow::floating_coupon(period.payment_date(), coupon, period.accrual_start, rate);
            if i == last {
                cf = cf.with_principal(terms.face_value, Decimal::ZERO);
            }
            flows.push(cf);
        }

        Ok(flows)
    }

    fn sinking_fund(
        terms: &BondTerms,
        coupon_rate: Decimal,
        frequency: Frequency,
        sinking: &[SinkingEntry],
        settlement: Date,
    ) -> BondResult<CashFlowSchedule> {
        let schedule = Self::schedule(terms, frequency)?;
        let periods = schedule.periods();
        let last = periods.len().saturating_sub(1);

        // Each retirement is paid with the first coupon on or after its date.
        let mut retired = vec![Decimal::ZERO; periods.len()];
        for entry in sinking {
            let index = periods
                .iter()
                .position(|p| p.reference_end >= entry.date)
                .unwrap_or(last);
            retired[index] += entry.amount;
        }

        let per_period = coupon_rate / Decimal::from(frequency.periods_per_year());
        let mut outstanding = terms.face_value;
        let mut flows = CashFlowSchedule::with_capacity(periods.len());

        for (i, period) in periods.iter().enumerate() {
            let coupon = outstanding * per_period * period.coupon_fraction(terms.day_count);
            let principal = if i == last {
                outstanding
            } else {
                retired[i].min(outstanding)
            };
            outstanding -= principal;

            if period.payment_date() <= settlement || (coupon.is_zero() && principal.is_zero()) {
                continue;
            }

            let mut cf = CashFlow::coupon(period.payment_date(), coupon, period.accrual_start);
            if !principal.is_zero() {
                cf = cf.with_principal(principal, outstanding);
            }
            flows.push(cf);
        }

        Ok(flows)
    }
}
