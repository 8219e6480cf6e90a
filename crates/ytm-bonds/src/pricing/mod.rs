//! Bond pricing calculations.
//!
//! This module provides:
//! - [`YieldSolver`]: Bisection yield-to-maturity solver
//! - [`YieldResult`] / [`YieldAnalysis`]: Solver outputs
//! - [`present_value`] / [`price_from_yield`]: Discounting a schedule

mod yield_solver;

pub use yield_solver::{
    BoundaryPolicy, YieldAnalysis, YieldResult, YieldSolver, DEFAULT_LOWER_BOUND, DEFAULT_UPPER_BOUND,
};

use ytm_core::types::CashFlowSchedule;

/// Present value of a schedule at a per-period discount rate.
///
/// `PV(y) = Σ cf[t] / (1 + y)^t` for `t = 1..=n`. For non-negative flows this
/// is strictly decreasing in `y` on `y > -1`, which is what lets the solver
/// bisect.
///
/// # Example
///
/// ```rust
/// use ytm_bonds::pricing::present_value;
/// use ytm_core::types::{CashFlow, CashFlowSchedule};
///
/// let mut schedule = CashFlowSchedule::new();
/// schedule.push(CashFlow::coupon(1, 3.0));
/// schedule.push(CashFlow::final_payment(2, 3.0, 100.0));
///
/// // A 6% annual coupon discounted at 3% per half-year is priced at par.
/// assert!((present_value(&schedule, 0.03) - 100.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn present_value(schedule: &CashFlowSchedule, period_rate: f64) -> f64 {
    let growth = 1.0 + period_rate;
    schedule
        .iter()
        .map(|cf| match i32::try_from(cf.period()) {
            Ok(period) => cf.amount() / growth.powi(period),
            Err(_) => cf.amount() / growth.powf(f64::from(cf.period())),
        })
        .sum()
}

/// Price implied by a bond-equivalent yield (semiannual rate doubled).
#[must_use]
pub fn price_from_yield(schedule: &CashFlowSchedule, bond_equivalent_yield: f64) -> f64 {
    present_value(schedule, bond_equivalent_yield / 2.0)
}
