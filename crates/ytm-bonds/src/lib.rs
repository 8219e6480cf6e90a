//! # YTM Bonds
//!
//! Semiannual cash flow generation and yield-to-maturity solving.
//!
//! This crate provides:
//!
//! - **Cash Flows**: Deterministic semiannual schedule from bond parameters
//! - **Pricing**: Present value, yield solving by bisection, BEY and EAR
//! - **Cache**: Memoized analyses keyed on the exact input tuple
//! - **Chart**: Per-period series for presentation layers
//!
//! ## Example
//!
//! ```rust
//! use ytm_bonds::prelude::*;
//! use ytm_core::BondParameters;
//!
//! let params = BondParameters::new(97.76, 11.0088, 5.0, 100.0).unwrap();
//! let analysis = YieldSolver::new().analyze(&params).unwrap();
//!
//! assert_eq!(analysis.periods, 10);
//! assert!((analysis.bond_equivalent_yield * 100.0 - 11.6119).abs() < 1e-3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::return_self_not_must_use)]

pub mod cache;
pub mod cashflows;
pub mod chart;
pub mod error;
pub mod pricing;

/// Prelude module for convenient imports.
pub mod prelude {
    // Cash flows
    pub use crate::cashflows::CashFlowGenerator;

    // Cache
    pub use crate::cache::{CacheStats, YieldCache};

    // Chart
    pub use crate::chart::{ChartPoint, ChartSeries};

    // Errors
    pub use crate::error::{BondError, BondResult};

    // Pricing
    pub use crate::pricing::{
        present_value, price_from_yield, BoundaryPolicy, YieldAnalysis, YieldResult,
        YieldSolver,
    };
}

pub use error::{BondError, BondResult};
pub use pricing::{YieldAnalysis, YieldResult, YieldSolver};
