//! Root-finding algorithms.
//!
//! - [`newton_raphson`]: quadratic convergence when the derivative is known
//! - [`newton_raphson_numerical`]: central-difference derivative
//! - [`newton_raphson_guarded`]: damps any step that leaves the function's
//!   domain, for functions such as discount factors that are undefined past
//!   a boundary, and bisects once a sign change has been bracketed
//!
//! All solvers converge on the residual `|f(x)| < tolerance`. The guarded
//! solver also stops when the root is pinned to floating-point resolution.
//! A solver that runs out of iterations returns an error instead of its last
//! iterate.
//!
//! # Example
//!
//! ```rust
//! use bondcalc_math::solvers::{newton_raphson, SolverConfig};
//!
//! // Bond: 5% annual coupon, 5 years, price 95
//! let price_fn = |y: f64| {
//!     let mut pv = 0.0;
//!     for t in 1..=5 {
//!         pv += 5.0 / (1.0 + y).powi(t);
//!     }
//!     pv += 100.0 / (1.0 + y).powi(5);
//!     pv - 95.0
//! };
//!
//! let d_price_fn = |y: f64| {
//!     let mut dpv = 0.0;
//!     for t in 1..=5 {
//!         dpv -= (t as f64) * 5.0 / (1.0 + y).powi(t + 1);
//!     }
//!     dpv -= 5.0 * 100.0 / (1.0 + y).powi(6);
//!     dpv
//! };
//!
//! let result = newton_raphson(price_fn, d_price_fn, 0.05, &SolverConfig::default()).unwrap();
//! assert!(result.root > 0.05);  // YTM > coupon rate for discount bond
//! ```

mod newton;

pub use newton::{
    central_difference, newton_raphson, newton_raphson_guarded, newton_raphson_numerical,
};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Absolute residual below which the solver reports convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of Newton steps taken.
    pub iterations: u32,
    /// Function value at the root.
    pub residual: f64,
}
