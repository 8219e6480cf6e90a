//! # YTM Core
//!
//! Core types for the YTM semiannual yield workspace.
//!
//! This crate provides the foundational building blocks shared by the
//! generator, the solver and the presentation layers:
//!
//! - **Bond parameters**: The validated `{price, coupon, years, face}` bundle
//! - **Cash flows**: Per-period coupon and principal payments
//! - **Errors**: Structural validation failures
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Parameters can only be built through a checked constructor
//! - **Explicit Over Implicit**: Half-year granularity of the term is enforced
//!   where it is assumed
//!
//! ## Example
//!
//! ```rust
//! use ytm_core::prelude::*;
//!
//! let params = BondParameters::new(97.76, 11.0088, 5.0, 100.0).unwrap();
//! assert_eq!(params.periods(), 10);
//!
//! assert!(BondParameters::new(97.76, 11.0088, 5.2, 100.0).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{YtmError, YtmResult};
    pub use crate::types::{
        BondParameters, CashFlow, CashFlowSchedule, CashFlowType, DEFAULT_FACE,
        PERIODS_PER_YEAR,
    };
}

// Re-export commonly used types at crate root
pub use error::{YtmError, YtmResult};
pub use types::{BondParameters, CashFlow, CashFlowSchedule, CashFlowType};
