//! Floating coupon rate resolution.

use rust_decimal::Decimal;

use bondcalc_core::types::Date;

use crate::error::{BondError, BondResult};
use crate::types::RateReset;

/// Rate-setting terms of a floating leg.
#[derive(Debug, Clone, Copy)]
pub struct FloatingLeg<'a> {
    /// Reset schedule in date order.
    pub resets: &'a [RateReset],
    /// Spread added to the index.
    pub spread: Decimal,
    /// Maximum coupon rate.
    pub cap: Option<Decimal>,
    /// Minimum coupon rate.
    pub floor: Option<Decimal>,
}

impl FloatingLeg<'_> {
    /// Coupon rate for the period accruing from `accrual_start`.
    ///
    /// Uses the latest reset on or before `accrual_start`; the rate is the
    /// reset's override (or fixing) plus the spread, clamped to the cap and
    /// floor.
    ///
    /// # Errors
    ///
    /// Returns `BondError::MissingRateFixing` if no reset applies or the
    /// applicable reset carries neither a fixing nor an override.
    pub fn rate_for(&self, accrual_start: Date) -> BondResult<Decimal> {
        let reset = self
            .resets
            .iter()
            .take_while(|r| r.reset_date <= accrual_start)
            .last()
            .ok_or_else(|| BondError::missing_rate_fixing(accrual_start, self.index_name()))?;

        let index = reset
            .effective_rate()
            .ok_or_else(|| BondError::missing_rate_fixing(accrual_start, reset.index.as_str()))?;

        let mut rate = index + self.spread;
        if let Some(floor) = self.floor {
            rate = rate.max(floor);
        }
        if let Some(cap) = self.cap {
            rate = rate.min(cap);
        }
        Ok(rate)
    }

    fn index_name(&self) -> &str {
        self.resets
            .first()
            .map_or("index", |r| r.index.as_str())
    }
}
