//! Bisection root-finding algorithms.

use log::trace;

use crate::error::{MathError, MathResult};
use crate::solvers::{Monotonicity, SolverConfig, SolverResult};

/// Monotone bisection over `[a, b]`.
///
/// Each step evaluates `f` at the midpoint and keeps the half that must hold
/// the root given the function's [`Monotonicity`]. No bracket check is made:
/// when the root lies outside `[a, b]` the search collapses onto the nearest
/// bound and the result is flagged with `at_boundary`.
///
/// With [`SolverConfig::fixed`] exactly `max_iterations` halvings run. With an
/// early-exit configuration the loop stops once the midpoint rounds onto an
/// endpoint, or once the half-width drops below a positive `tolerance`.
///
/// `at_boundary` is set only when a bound the search never moved off does
/// not itself hold the root: a root exactly at `a` or `b` is inside.
///
/// # Errors
///
/// Returns [`MathError::InvalidInput`] if either bound is not finite or if
/// `a >= b`, and [`MathError::ConvergenceFailed`] when a run with a positive
/// tolerance uses up `max_iterations` before reaching it.
///
/// # Example
///
/// ```rust
/// use ytm_math::solvers::{monotone_bisection, Monotonicity, SolverConfig};
///
/// let f = |x: f64| 2.0 - x * x; // decreasing on [1, 2]
/// let result =
///     monotone_bisection(f, 1.0, 2.0, Monotonicity::Decreasing, &SolverConfig::default())
///         .unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-15);
/// ```
pub fn monotone_bisection<F>(
    f: F,
    a: f64,
    b: f64,
    monotonicity: Monotonicity,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    if !a.is_finite() || !b.is_finite() {
        return Err(MathError::invalid_input(format!(
            "bisection bounds must be finite, got [{a}, {b}]"
        )));
    }
    if a >= b {
        return Err(MathError::invalid_input(format!(
            "lower bound {a} must be below upper bound {b}"
        )));
    }

    let mut lo = a;
    let mut hi = b;
    let mut lo_moved = false;
    let mut hi_moved = false;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        if config.early_exit && (hi - lo) / 2.0 < config.tolerance {
            break;
        }

        let mid = (lo + hi) / 2.0;
        // Bracket is at f64 resolution; further halvings keep returning `mid`.
        if config.early_exit && (mid == lo || mid == hi) {
            break;
        }

        if monotonicity.root_above(f(mid)) {
            lo = mid;
            lo_moved = true;
        } else {
            hi = mid;
            hi_moved = true;
        }
        iterations += 1;
    }

    let root = (lo + hi) / 2.0;
    let residual = f(root);

    let resolved = root == lo || root == hi;
    if config.early_exit
        && config.tolerance > 0.0
        && (hi - lo) / 2.0 >= config.tolerance
        && !resolved
    {
        return Err(MathError::convergence_failed(iterations, residual));
    }

    let at_boundary = (!lo_moved && monotonicity.root_below(f(a)))
        || (!hi_moved && monotonicity.root_above(f(b)));

    trace!("bisection finished: root={root:e} iterations={iterations} residual={residual:e}");

    Ok(SolverResult {
        root,
        iterations,
        residual,
        at_boundary,
    })
}

/// Bracketed bisection over `[a, b]`.
///
/// Same search as [`monotone_bisection`], but the endpoints are checked
/// first: `f(a)` and `f(b)` must not share a sign.
///
/// # Errors
///
/// Returns [`MathError::InvalidBracket`] if the interval does not bracket a
/// root, or [`MathError::InvalidInput`] for malformed bounds.
///
/// # Example
///
/// ```rust
/// use ytm_math::solvers::{bisection, Monotonicity, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let result = bisection(f, 2.0, 3.0, Monotonicity::Increasing, &SolverConfig::default());
/// assert!(result.is_err());
/// ```
pub fn bisection<F>(
    f: F,
    a: f64,
    b: f64,
    monotonicity: Monotonicity,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let lo = a.min(b);
    let hi = a.max(b);

    let f_lo = f(lo);
    let f_hi = f(hi);

    // Check that root is bracketed
    if f_lo * f_hi > 0.0 || f_lo.is_nan() || f_hi.is_nan() {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    monotone_bisection(f, lo, hi, monotonicity, config)
}
