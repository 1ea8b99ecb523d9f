//! Duration measures.
//!
//! ```text
//! D_mac = Σ(t_i × PV(CF_i)) / P
//! D_mod = D_mac / (1 + y/f)
//! D_simple = (P(y - Δy) - P(y + Δy)) / (2 × Δy × P(y))
//! ```
//!
//! When `y - Δy` falls outside the discounting domain, simple duration uses
//! the forward difference `(P(y) - P(y + Δy)) / (Δy × P(y))` instead.

use bondcalc_bonds::pricing::DiscountedFlows;
use log::debug;

use crate::error::{EngineError, EngineResult};

/// Default yield bump for [`simple_duration`] (1bp).
pub const DEFAULT_BUMP_SIZE: f64 = 0.0001;

/// Macaulay duration: present-value weighted average time to each flow.
///
/// Present values are taken under the flows' own compounding convention.
pub fn macaulay_duration(flows: &DiscountedFlows, ytm: f64) -> EngineResult<f64> {
    if flows.is_empty() {
        return Err(EngineError::risk_calculation("no cash flows provided"));
    }

    let (weighted_sum, price) = flows
        .present_values(ytm)
        .fold((0.0, 0.0), |(weighted, total), (t, pv)| (weighted + t * pv, total + pv));

    if !price.is_finite() || price.abs() < 1e-10 {
        return Err(EngineError::risk_calculation(
            "price is zero in macaulay duration",
        ));
    }

    Ok(weighted_sum / price)
}

/// Convert Macaulay duration to modified duration.
pub fn modified_from_macaulay(macaulay: f64, ytm: f64, frequency: u32) -> f64 {
    macaulay / (1.0 + ytm / f64::from(frequency))
}

/// Price sensitivity from a symmetric yield bump.
///
/// Needs no closed form, so it stays meaningful for flows truncated at an
/// exercise date. A yield so close to the domain edge that the downward bump
/// leaves it falls back to a one-sided bump upward.
pub fn simple_duration(flows: &DiscountedFlows, ytm: f64, bump: f64) -> EngineResult<f64> {
    if bump.is_nan() || bump <= 0.0 {
        return Err(EngineError::risk_calculation(format!(
            "bump size {bump} must be positive"
        )));
    }
    if !flows.is_valid_yield(ytm) {
        return Err(EngineError::risk_calculation(format!(
            "yield {ytm} is outside the discounting domain"
        )));
    }

    let price = flows.price(ytm);
    if !price.is_finite() || price.abs() < 1e-10 {
        return Err(EngineError::risk_calculation("price is zero in simple duration"));
    }

    let price_up = flows.price(ytm + bump);
    if !flows.is_valid_yield(ytm - bump) {
        debug!(
            "yield {:.10} is within {} of the domain edge; using a forward difference",
            ytm, bump
        );
        return Ok((price - price_up) / (bump * price));
    }

    let price_down = flows.price(ytm - bump);
    Ok((price_down - price_up) / (2.0 * bump * price))
}

/// Approximate price change from modified duration alone.
pub fn price_change_from_duration(modified: f64, price: f64, yield_change: f64) -> f64 {
    -modified * price * yield_change
}
