//! Newton-Raphson root-finding algorithm.

use log::{debug, trace, warn};

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Derivatives smaller than this in magnitude stop the iteration.
const MIN_DERIVATIVE: f64 = 1e-15;

/// Step size for central-difference derivatives.
const FD_STEP: f64 = 1e-8;

/// How many times a step may be halved to stay inside the domain.
const MAX_STEP_HALVINGS: u32 = 60;

/// Relative step size treated as converged.
const STEP_RESOLUTION: f64 = 4.0 * f64::EPSILON;

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration `x_{n+1} = x_n - f(x_n) / f'(x_n)` until
/// `|f(x_n)| < config.tolerance`.
///
/// # Example
///
/// ```rust
/// use bondcalc_math::solvers::{newton_raphson, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    newton_raphson_guarded(f, df, f64::is_finite, initial_guess, config)
}

/// Newton-Raphson with a central-difference derivative.
pub fn newton_raphson_numerical<F>(
    f: F,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    newton_raphson(&f, |x| central_difference(&f, x), initial_guess, config)
}

/// Central-difference estimate of `f'(x)`.
pub fn central_difference<F>(f: F, x: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(x + FD_STEP) - f(x - FD_STEP)) / (2.0 * FD_STEP)
}

/// Newton-Raphson restricted to the points where `in_domain` holds.
///
/// Before a sign change is seen, a step that would land outside the domain
/// or where `f` overflows is halved until it lands inside. Once two iterates
/// straddle the root, any Newton step that leaves that bracket or fails to
/// halve the previous step is replaced by a bisection of the bracket. The
/// iteration also stops once a Newton step is below the floating-point
/// resolution of the iterate, which covers residual tolerances finer than
/// `f` can resolve near the root.
///
/// The initial guess must itself be inside the domain.
///
/// # Errors
///
/// - [`MathError::OutOfDomain`] if the guess is outside the domain, `f`
///   stops being finite, or a step cannot be damped back into the domain
/// - [`MathError::DivisionByZero`] if the derivative vanishes before the
///   root is bracketed
/// - [`MathError::ConvergenceFailed`] after `config.max_iterations` steps
pub fn newton_raphson_guarded<F, DF, D>(
    f: F,
    df: DF,
    in_domain: D,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
    D: Fn(f64) -> bool,
{
    if config.tolerance.is_nan() || config.tolerance <= 0.0 || config.max_iterations == 0 {
        return Err(MathError::invalid_input(format!(
            "tolerance must be positive and max_iterations non-zero (got {}, {})",
            config.tolerance, config.max_iterations
        )));
    }
    if !initial_guess.is_finite() || !in_domain(initial_guess) {
        return Err(MathError::out_of_domain(initial_guess));
    }

    let admissible = |x: f64| x.is_finite() && in_domain(x) && f(x).is_finite();

    let mut x = initial_guess;
    let mut bracket = Bracket::default();
    let mut previous_step = f64::INFINITY;

    for iteration in 0..config.max_iterations {
        let fx = f(x);
        if !fx.is_finite() {
            return Err(MathError::out_of_domain(x));
        }

        trace!("newton iteration {}: x = {:.12}, f(x) = {:.3e}", iteration, x, fx);

        if fx.abs() < config.tolerance {
            debug!(
                "newton converged in {} iterations: root = {:.12}, residual = {:.3e}",
                iteration, x, fx
            );
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        bracket.record(x, fx);
        if let Some((lo, hi)) = bracket.bounds() {
            if hi - lo <= STEP_RESOLUTION * x.abs().max(1.0) {
                debug!(
                    "newton bracket collapsed: iterations = {}, root = {:.12}, residual = {:.3e}",
                    iteration, x, fx
                );
                return Ok(SolverResult {
                    root: x,
                    iterations: iteration,
                    residual: fx,
                });
            }
        }

        let dfx = df(x);
        let newton = if dfx.is_finite() && dfx.abs() >= MIN_DERIVATIVE {
            Some(x - fx / dfx)
        } else {
            None
        };

        if let Some(candidate) = newton {
            if (candidate - x).abs() <= STEP_RESOLUTION * x.abs().max(1.0) {
                debug!(
                    "newton step at resolution: iterations = {}, root = {:.12}, residual = {:.3e}",
                    iteration, x, fx
                );
                return Ok(SolverResult {
                    root: x,
                    iterations: iteration,
                    residual: fx,
                });
            }
        }

        let next = match (bracket.bounds(), newton) {
            (Some((lo, hi)), Some(candidate))
                if candidate > lo
                    && candidate < hi
                    && (candidate - x).abs() <= 0.5 * previous_step
                    && admissible(candidate) =>
            {
                candidate
            }
            (Some((lo, hi)), _) => {
                trace!("newton bisecting [{:.12}, {:.12}]", lo, hi);
                0.5 * (lo + hi)
            }
            (None, Some(candidate)) => damp(x, candidate, &admissible)?,
            (None, None) => return Err(MathError::DivisionByZero { value: dfx }),
        };

        previous_step = (next - x).abs();
        x = next;
    }

    let fx = f(x);
    if fx.is_finite() && fx.abs() < config.tolerance {
        return Ok(SolverResult {
            root: x,
            iterations: config.max_iterations,
            residual: fx,
        });
    }

    Err(MathError::convergence_failed(config.max_iterations, fx.abs()))
}

/// Halves the step from `x` toward `target` until it lands on an admissible
/// point.
fn damp(x: f64, target: f64, admissible: impl Fn(f64) -> bool) -> MathResult<f64> {
    let mut step = x - target;
    let mut next = target;
    let mut halvings = 0;
    while !admissible(next) {
        if halvings == MAX_STEP_HALVINGS {
            return Err(MathError::out_of_domain(next));
        }
        step *= 0.5;
        next = x - step;
        halvings += 1;
    }
    if halvings > 0 {
        warn!(
            "newton step from {:.12} left the domain; damped {} times to {:.12}",
            x, halvings, next
        );
    }
    Ok(next)
}

/// Latest iterates on each side of the root.
#[derive(Debug, Default, Clone, Copy)]
struct Bracket {
    positive: Option<f64>,
    negative: Option<f64>,
}

impl Bracket {
    fn record(&mut self, x: f64, fx: f64) {
        if fx > 0.0 {
            self.positive = Some(x);
        } else {
            self.negative = Some(x);
        }
    }

    fn bounds(&self) -> Option<(f64, f64)> {
        match (self.positive, self.negative) {
            (Some(a), Some(b)) => Some((a.min(b), a.max(b))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_already_at_root() {
        let f = |x: f64| x - 3.0;
        let result = newton_raphson(f, |_| 1.0, 3.0, &SolverConfig::default()).unwrap();

        assert_eq!(result.iterations, 0);
        assert_eq!(result.root, 3.0);
    }

    #[test]
    fn test_numerical_derivative() {
        let f = |x: f64| x * x * x - 27.0;
        let result = newton_raphson_numerical(f, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_derivative() {
        let f = |x: f64| x * x + 1.0;
        let df = |x: f64| 2.0 * x;

        let result = newton_raphson(f, df, 0.0, &SolverConfig::default());
        assert!(matches!(result, Err(MathError::DivisionByZero { .. })));
    }

    #[test]
    fn test_iteration_cap_is_an_error() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;
        let config = SolverConfig::default().with_max_iterations(3);

        let result = newton_raphson(f, df, 1000.0, &config);
        assert!(matches!(
            result,
            Err(MathError::ConvergenceFailed { iterations: 3, .. })
        ));
    }

    #[test]
    fn test_guarded_damps_step() {
        // ln(x) = 1 from x = 10: the raw first step lands at about -3
        let f = |x: f64| x.ln() - 1.0;
        let df = |x: f64| 1.0 / x;

        let result =
            newton_raphson_guarded(f, df, |x| x > 0.0, 10.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, std::f64::consts::E, epsilon = 1e-9);
    }

    #[test]
    fn test_guarded_recovers_from_overflowing_step() {
        // exp(-x) = 1e6 from x = 0: the raw first step lands near -1e6
        let f = |x: f64| (-x).exp() - 1e6;
        let df = |x: f64| -(-x).exp();

        let result =
            newton_raphson_guarded(f, df, f64::is_finite, 0.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, -(1e6f64.ln()), epsilon = 1e-9);
        assert!(result.iterations < 100);
    }

    #[test]
    fn test_guarded_bisects_slow_one_sided_approach() {
        // Overshoot to the far left, then plain Newton would crawl back one
        // unit per step
        let f = |x: f64| (-8.0 * x).exp() - 100.0;
        let df = |x: f64| -8.0 * (-8.0 * x).exp();

        let plain = newton_raphson_guarded(
            f,
            df,
            |x| x > -60.0,
            0.5,
            &SolverConfig::default().with_max_iterations(25),
        )
        .unwrap();
        assert_relative_eq!(plain.root, -(100f64.ln()) / 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_guarded_stops_at_float_resolution() {
        // Near the pole the residual cannot reach 1e-10
        let f = |x: f64| 1.0 / (x + 0.2) - 1e9;
        let df = |x: f64| -1.0 / ((x + 0.2) * (x + 0.2));

        let result =
            newton_raphson_guarded(f, df, |x| x > -0.2, 0.05, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, 1e-9 - 0.2, epsilon = 1e-15);
    }

    #[test]
    fn test_guarded_rejects_bad_guess() {
        let f = |x: f64| x.ln();
        let df = |x: f64| 1.0 / x;

        let result = newton_raphson_guarded(f, df, |x| x > 0.0, -1.0, &SolverConfig::default());
        assert_eq!(result, Err(MathError::out_of_domain(-1.0)));

        let result = newton_raphson(f, df, f64::NAN, &SolverConfig::default());
        assert!(matches!(result, Err(MathError::OutOfDomain { .. })));
    }

    #[test]
    fn test_invalid_config() {
        let config = SolverConfig::new(0.0, 100);
        let result = newton_raphson(|x| x, |_| 1.0, 1.0, &config);
        assert!(matches!(result, Err(MathError::InvalidInput { .. })));
    }

    proptest! {
        #[test]
        fn prop_cube_roots(target in 0.5f64..1000.0) {
            let f = |x: f64| x * x * x - target;
            let df = |x: f64| 3.0 * x * x;

            let result = newton_raphson(f, df, 1.0, &SolverConfig::default()).unwrap();
            prop_assert!((result.root - target.cbrt()).abs() < 1e-8);
        }
    }
}
