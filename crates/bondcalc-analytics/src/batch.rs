//! Batch computation across independent bonds.
//!
//! Each bond is computed on its own; with the `parallel` feature the bonds
//! are spread over the rayon thread pool.

use bondcalc_bonds::types::BondTerms;
use bondcalc_core::types::Date;

use crate::dispatcher::compute_analytics;
use crate::error::EngineResult;
use crate::result::AnalyticsResult;

/// Computes analytics for every bond with the default configuration.
///
/// Results are in input order; one bond failing does not affect the others.
pub fn compute_analytics_batch(
    bonds: &[BondTerms],
    analytics_date: Date,
) -> Vec<EngineResult<AnalyticsResult>> {
    map_bonds(bonds, |terms| compute_analytics(terms, analytics_date))
}

/// Maps `f` over the bonds, in parallel when the `parallel` feature is enabled.
pub(crate) fn map_bonds<U, F>(bonds: &[BondTerms], f: F) -> Vec<U>
where
    U: Send,
    F: Fn(&BondTerms) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        bonds.par_iter().map(f).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        bonds.iter().map(f).collect()
    }
}
