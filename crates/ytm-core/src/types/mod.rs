//! Domain types for semiannual bond yield calculations.

mod cashflow;
mod parameters;

pub use cashflow::{CashFlow, CashFlowSchedule, CashFlowType};
pub use parameters::{BondParameters, DEFAULT_FACE, MAX_PERIODS, PERIODS_PER_YEAR};
