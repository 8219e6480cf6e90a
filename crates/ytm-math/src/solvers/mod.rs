//! Root-finding algorithms.
//!
//! This module provides the two bisection variants used by the yield solver:
//!
//! - [`monotone_bisection`]: Halving search for a monotone function. Never
//!   fails on a well-formed interval; a root outside the interval converges
//!   onto the nearest bound.
//! - [`bisection`]: Sign-change bisection that requires a bracketing interval
//!   and reports [`MathError::InvalidBracket`](crate::MathError::InvalidBracket)
//!   otherwise.
//!
//! # Stopping Rules
//!
//! | Rule | Config | Behaviour |
//! |------|--------|-----------|
//! | Fixed steps | [`SolverConfig::fixed`] | Exactly `max_iterations` halvings, no early exit |
//! | Converged | [`SolverConfig::converged`] | Stops once the midpoint no longer splits the bracket |
//! | Tolerance | [`SolverConfig::new`] | As `Converged`, and also stops once the half-width falls below `tolerance` |
//!
//! Two hundred fixed halvings of a unit interval leave a width of `2^-200`,
//! far below `f64` resolution, so the fixed rule is converged to full double
//! precision for any root not vanishingly close to zero.
//!
//! Once `(lo + hi) / 2` rounds onto `lo` or `hi`, further halvings cannot
//! change the result: the fixed rule keeps returning that midpoint. The
//! `Converged` rule stops there, so it returns the same root as the fixed
//! rule whenever the fixed rule reaches that point, and a tighter one when it
//! does not.
//!
//! # Example: Semiannual YTM
//!
//! ```rust
//! use ytm_math::solvers::{monotone_bisection, Monotonicity, SolverConfig};
//!
//! // 5% coupon, 5 years, semiannual, price 95
//! let price_fn = |y: f64| {
//!     let mut pv = 0.0;
//!     for t in 1..=10 {
//!         pv += 2.5 / (1.0 + y).powi(t);
//!     }
//!     pv += 100.0 / (1.0 + y).powi(10);
//!     pv - 95.0
//! };
//!
//! let result = monotone_bisection(
//!     price_fn,
//!     0.0,
//!     1.0,
//!     Monotonicity::Decreasing,
//!     &SolverConfig::fixed(200),
//! )
//! .unwrap();
//! assert!(result.root > 0.025); // above the coupon rate for a discount bond
//! ```

mod bisection;

pub use bisection::{bisection, monotone_bisection};

/// Default tolerance for tolerance-based stopping.
pub const DEFAULT_TOLERANCE: f64 = 1e-15;

/// Default maximum iterations for early-exit stopping.
///
/// Halving `[0, 1]` down to the smallest subnormal takes 1075 steps.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1100;

/// Number of halvings used by the fixed-step rule.
pub const DEFAULT_FIXED_STEPS: u32 = 200;

/// Configuration for bisection algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Half-width tolerance for convergence. Ignored when `early_exit` is off.
    pub tolerance: f64,
    /// Maximum number of halvings. With `early_exit` off this is the exact count.
    pub max_iterations: u32,
    /// Whether the solver may stop before `max_iterations`.
    pub early_exit: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::fixed(DEFAULT_FIXED_STEPS)
    }
}

impl SolverConfig {
    /// Creates a tolerance-based configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            early_exit: true,
        }
    }

    /// Creates a configuration that halves until the bracket is at `f64`
    /// resolution, up to `max_iterations` times.
    #[must_use]
    pub fn converged(max_iterations: u32) -> Self {
        Self::new(0.0, max_iterations)
    }

    /// Creates a configuration that performs exactly `steps` halvings.
    #[must_use]
    pub fn fixed(steps: u32) -> Self {
        Self {
            tolerance: 0.0,
            max_iterations: steps,
            early_exit: false,
        }
    }

    /// Sets the tolerance and enables early exit.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self.early_exit = true;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Direction in which a function moves as its argument grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Monotonicity {
    /// `f` grows with `x`.
    Increasing,
    /// `f` shrinks as `x` grows (bond price against yield).
    Decreasing,
}

impl Monotonicity {
    /// Returns true when a function value of `f_mid` places the root above `mid`.
    #[inline]
    #[must_use]
    pub fn root_above(self, f_mid: f64) -> bool {
        match self {
            Monotonicity::Increasing => f_mid < 0.0,
            Monotonicity::Decreasing => f_mid > 0.0,
        }
    }

    /// Returns true when a function value of `f_x` places the root strictly below `x`.
    #[inline]
    #[must_use]
    pub fn root_below(self, f_x: f64) -> bool {
        match self {
            Monotonicity::Increasing => f_x > 0.0,
            Monotonicity::Decreasing => f_x < 0.0,
        }
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
    /// True when the root lies outside `[a, b]` and the search converged onto
    /// the nearest bound.
    pub at_boundary: bool,
}
