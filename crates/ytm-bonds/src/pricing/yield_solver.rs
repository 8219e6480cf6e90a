//! Yield-to-maturity solver using bisection on the semiannual rate.
//!
//! The solver searches the per-period rate `y` for which the present value of
//! the schedule equals the price. Present value is strictly decreasing in `y`,
//! so a midpoint whose PV exceeds the price means the root lies above it.
//!
//! Defaults reproduce the reference algorithm exactly: `y ∈ [0, 1]`, 200
//! halvings with no early exit, result `(lo + hi) / 2`. A price implying a
//! rate outside the interval converges onto the nearest bound unless
//! [`BoundaryPolicy::Reject`] is selected.
//!
//! # Example
//!
//! ```rust
//! use ytm_bonds::cashflows::CashFlowGenerator;
//! use ytm_bonds::pricing::YieldSolver;
//! use ytm_core::BondParameters;
//!
//! let params = BondParameters::new(100.0, 6.0, 10.0, 100.0).unwrap();
//! let schedule = CashFlowGenerator::generate(&params);
//!
//! let result = YieldSolver::new().solve(&schedule, params.price()).unwrap();
//! assert!((result.bond_equivalent_yield - 0.06).abs() < 1e-9);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use ytm_core::types::{BondParameters, CashFlowSchedule};
use ytm_math::solvers::{
    bisection, monotone_bisection, Monotonicity, SolverConfig, SolverResult, DEFAULT_FIXED_STEPS,
    DEFAULT_MAX_ITERATIONS,
};
use ytm_math::MathError;

use super::present_value;
use crate::cashflows::CashFlowGenerator;
use crate::error::{BondError, BondResult};

/// Default lower bound of the per-period rate search.
pub const DEFAULT_LOWER_BOUND: f64 = 0.0;

/// Default upper bound of the per-period rate search.
pub const DEFAULT_UPPER_BOUND: f64 = 1.0;

/// What to do when the implied yield lies outside the search interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Converge onto the nearest bound and flag the result.
    #[default]
    Clamp,
    /// Return [`BondError::YieldOutOfBounds`].
    Reject,
}

/// Result of a yield calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldResult {
    /// Per-semiannual-period discount rate.
    pub period_rate: f64,
    /// `2 * period_rate`.
    pub bond_equivalent_yield: f64,
    /// `(1 + period_rate)^2 - 1`.
    pub effective_annual_rate: f64,
    /// Number of halvings performed.
    pub iterations: u32,
    /// `PV(period_rate) - price`.
    pub residual: f64,
    /// True when the rate converged onto a search bound.
    pub at_boundary: bool,
}

impl YieldResult {
    /// Derives the annualized metrics from a per-period rate.
    #[must_use]
    pub fn from_period_rate(period_rate: f64, iterations: u32, residual: f64) -> Self {
        Self {
            period_rate,
            bond_equivalent_yield: 2.0 * period_rate,
            effective_annual_rate: (1.0 + period_rate).powi(2) - 1.0,
            iterations,
            residual,
            at_boundary: false,
        }
    }

    fn from_solver(result: SolverResult) -> Self {
        Self {
            at_boundary: result.at_boundary,
            ..Self::from_period_rate(result.root, result.iterations, result.residual)
        }
    }

    /// Bond-equivalent yield in percent.
    #[must_use]
    pub fn bey_percent(&self) -> f64 {
        self.bond_equivalent_yield * 100.0
    }

    /// Effective annual rate in percent.
    #[must_use]
    pub fn ear_percent(&self) -> f64 {
        self.effective_annual_rate * 100.0
    }
}

/// Full output of a yield computation, as consumed by presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldAnalysis {
    /// Per-semiannual-period discount rate.
    pub period_rate: f64,
    /// Bond-equivalent yield.
    pub bond_equivalent_yield: f64,
    /// Effective annual rate.
    pub effective_annual_rate: f64,
    /// Number of semiannual periods.
    pub periods: u32,
    /// Payment amounts in period order.
    pub cashflows: Vec<f64>,
    /// The solver result behind the headline figures.
    #[serde(skip)]
    pub result: YieldResult,
    /// The schedule that was discounted.
    #[serde(skip)]
    pub schedule: CashFlowSchedule,
}

impl YieldAnalysis {
    /// Bundles a solver result with its schedule.
    #[must_use]
    pub fn new(result: YieldResult, schedule: CashFlowSchedule) -> Self {
        Self {
            period_rate: result.period_rate,
            bond_equivalent_yield: result.bond_equivalent_yield,
            effective_annual_rate: result.effective_annual_rate,
            periods: schedule.periods(),
            cashflows: schedule.amounts(),
            result,
            schedule,
        }
    }
}

/// Yield-to-maturity solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldSolver {
    /// Solver configuration.
    config: SolverConfig,
    /// Lower per-period rate bound.
    lower_bound: f64,
    /// Upper per-period rate bound.
    upper_bound: f64,
    /// Out-of-interval handling.
    policy: BoundaryPolicy,
}

impl Default for YieldSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl YieldSolver {
    /// Creates a new yield solver with default settings.
    ///
    /// Default search interval: `[0, 1]` per period
    /// Default stopping rule: 200 halvings, no early exit
    /// Default boundary policy: Clamp
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SolverConfig::fixed(DEFAULT_FIXED_STEPS),
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
            policy: BoundaryPolicy::Clamp,
        }
    }

    /// Runs exactly `steps` halvings.
    #[must_use]
    pub fn with_fixed_iterations(mut self, steps: u32) -> Self {
        self.config = SolverConfig::fixed(steps);
        self
    }

    /// Halves until the rate interval reaches `f64` resolution, up to
    /// `max_iterations` times.
    ///
    /// The result matches the fixed 200-step run wherever that run is itself
    /// at resolution, usually after far fewer halvings.
    #[must_use]
    pub fn with_early_exit(mut self, max_iterations: u32) -> Self {
        self.config = SolverConfig::converged(max_iterations);
        self
    }

    /// Early exit with the default iteration cap.
    #[must_use]
    pub fn converged() -> Self {
        Self::new().with_early_exit(DEFAULT_MAX_ITERATIONS)
    }

    /// Sets the per-period rate search interval.
    #[must_use]
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    /// Sets the boundary policy.
    #[must_use]
    pub fn with_boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Returns the search interval.
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower_bound, self.upper_bound)
    }

    /// Returns the boundary policy.
    pub fn boundary_policy(&self) -> BoundaryPolicy {
        self.policy
    }

    /// Checks that the settings describe a usable search.
    ///
    /// The lower bound must exceed -1 so every discount factor is defined,
    /// and the interval must be non-empty. An early-exit run may not be
    /// capped below the fixed step count, or it could stop short of it.
    pub fn validate(&self) -> BondResult<()> {
        let (lower, upper) = self.bounds();
        if !lower.is_finite() || !upper.is_finite() {
            return Err(BondError::invalid_settings("bounds must be finite"));
        }
        if lower <= -1.0 {
            return Err(BondError::invalid_settings(format!(
                "lower bound {lower} must be above -1"
            )));
        }
        if lower >= upper {
            return Err(BondError::invalid_settings(format!(
                "lower bound {lower} must be below upper bound {upper}"
            )));
        }
        let tolerance = self.config.tolerance;
        if self.config.early_exit && (tolerance.is_nan() || tolerance < 0.0) {
            return Err(BondError::invalid_settings("tolerance must not be negative"));
        }
        if self.config.early_exit && self.config.max_iterations < DEFAULT_FIXED_STEPS {
            return Err(BondError::invalid_settings(format!(
                "early exit needs at least {DEFAULT_FIXED_STEPS} iterations, got {}",
                self.config.max_iterations
            )));
        }
        Ok(())
    }

    /// Solves for the per-period rate that prices `schedule` at `price`.
    ///
    /// # Arguments
    ///
    /// * `schedule` - Future cash flows, periods `1..=n`
    /// * `price` - Target price
    ///
    /// # Errors
    ///
    /// - [`BondError::EmptySchedule`] when there is nothing to discount
    /// - [`BondError::InvalidPrice`] for a non-positive or non-finite price
    /// - [`BondError::YieldOutOfBounds`] under [`BoundaryPolicy::Reject`]
    /// - [`BondError::InvalidSettings`] for a malformed search interval
    pub fn solve(&self, schedule: &CashFlowSchedule, price: f64) -> BondResult<YieldResult> {
        if schedule.is_empty() {
            return Err(BondError::EmptySchedule);
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(BondError::invalid_price(format!(
                "{price} is not a positive finite price"
            )));
        }
        self.validate()?;

        let (lower, upper) = self.bounds();
        let objective = |y: f64| present_value(schedule, y) - price;

        let solved = match self.policy {
            BoundaryPolicy::Clamp => {
                monotone_bisection(objective, lower, upper, Monotonicity::Decreasing, &self.config)?
            }
            BoundaryPolicy::Reject => {
                bisection(objective, lower, upper, Monotonicity::Decreasing, &self.config)
                    .map_err(|e| match e {
                        MathError::InvalidBracket { fa, fb, .. } => BondError::YieldOutOfBounds {
                            price,
                            lower,
                            upper,
                            pv_lower: fa + price,
                            pv_upper: fb + price,
                        },
                        other => other.into(),
                    })?
            }
        };

        let result = YieldResult::from_solver(solved);
        debug!(
            "solved {} flows at price {price}: period_rate={:.12} iterations={} at_boundary={}",
            schedule.len(),
            result.period_rate,
            result.iterations,
            result.at_boundary
        );

        Ok(result)
    }

    /// Generates the schedule for `params` and solves it at the bundle's price.
    pub fn analyze(&self, params: &BondParameters) -> BondResult<YieldAnalysis> {
        let schedule = CashFlowGenerator::generate(params);
        let result = self.solve(&schedule, params.price())?;
        Ok(YieldAnalysis::new(result, schedule))
    }
}
