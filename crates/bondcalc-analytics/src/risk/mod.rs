//! Risk analytics for a solved bond.
//!
//! - **Duration**: Macaulay, modified and simple (bumped)
//! - **Convexity**: analytical
//! - **DV01**: dollar value of a basis point
//!
//! All measures take the flows remaining after settlement and a solved
//! yield; none of them solve for a yield themselves.

mod convexity;
mod duration;
mod dv01;

pub use convexity::{analytical_convexity, price_change_with_convexity};
pub use duration::{
    macaulay_duration, modified_from_macaulay, price_change_from_duration, simple_duration,
    DEFAULT_BUMP_SIZE,
};
pub use dv01::{dv01_from_duration, dv01_from_prices, BASIS_POINT};

use bondcalc_bonds::pricing::DiscountedFlows;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

/// Sensitivity measures of one bond at one yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Macaulay duration in years.
    pub macaulay_duration: f64,
    /// Modified duration.
    pub modified_duration: f64,
    /// Duration from a symmetric yield bump.
    pub simple_duration: f64,
    /// Analytical convexity.
    pub convexity: f64,
    /// Price change per basis point.
    pub dv01: f64,
}

impl RiskMetrics {
    /// Computes every measure.
    ///
    /// `flows` drive Macaulay, modified, convexity and DV01; `bumped_flows`
    /// drive simple duration. The two differ for a bond worked out to an
    /// exercise date.
    pub fn compute(
        flows: &DiscountedFlows,
        bumped_flows: &DiscountedFlows,
        ytm: f64,
        bumped_yield: f64,
        frequency: u32,
        bump: f64,
    ) -> EngineResult<Self> {
        let macaulay = macaulay_duration(flows, ytm)?;
        let modified = modified_from_macaulay(macaulay, ytm, frequency);
        let convexity = analytical_convexity(flows, ytm, frequency)?;
        let simple = simple_duration(bumped_flows, bumped_yield, bump)?;
        let dv01 = dv01_from_duration(modified, flows.price(ytm));

        Ok(Self {
            macaulay_duration: macaulay,
            modified_duration: modified,
            simple_duration: simple,
            convexity,
            dv01,
        })
    }

    /// Estimate price change for a given yield shift.
    ///
    /// ΔP ≈ -D_mod × P × Δy + ½ × C × P × (Δy)²
    pub fn estimate_price_change(&self, yield_change: f64, price: f64) -> f64 {
        price_change_with_convexity(self.modified_duration, self.convexity, price, yield_change)
    }
}
