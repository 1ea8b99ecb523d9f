//! Domain types for bond analytics.
//!
//! - [`Date`]: Calendar date for financial calculations
//! - [`Frequency`]: Coupon payment frequency
//! - [`Compounding`]: Yield compounding convention and its discount factors
//! - [`CashFlow`]: Dated cash flow split into coupon and principal

mod cashflow;
mod date;
mod frequency;

pub use cashflow::{CashFlow, CashFlowSchedule, CashFlowType};
pub use date::Date;
pub use frequency::{Compounding, CompoundingRule, Frequency};

/// Normalizes a convention name for lookup: upper case, with spaces and
/// dashes folded into underscores.
pub(crate) fn normalize_token(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}
