//! Error types for bond operations.

use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// The schedule has nothing to discount.
    #[error("Cash flow schedule is empty")]
    EmptySchedule,

    /// Invalid price.
    #[error("Invalid price: {reason}")]
    InvalidPrice {
        /// Description of what's invalid.
        reason: String,
    },

    /// The implied yield lies outside the search interval.
    #[error(
        "Yield for price {price} lies outside [{lower}, {upper}] per period \
         (PV at bounds: {pv_lower:.6} .. {pv_upper:.6})"
    )]
    YieldOutOfBounds {
        /// Target price.
        price: f64,
        /// Lower per-period rate bound.
        lower: f64,
        /// Upper per-period rate bound.
        upper: f64,
        /// Present value at the lower bound.
        pv_lower: f64,
        /// Present value at the upper bound.
        pv_upper: f64,
    },

    /// Solver settings are unusable.
    #[error("Invalid solver settings: {reason}")]
    InvalidSettings {
        /// Description of the problem.
        reason: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    CoreError(#[from] ytm_core::YtmError),

    /// Numerical solver error.
    #[error("Solver error: {0}")]
    MathError(#[from] ytm_math::MathError),
}

impl BondError {
    /// Creates an invalid price error.
    #[must_use]
    pub fn invalid_price(reason: impl Into<String>) -> Self {
        Self::InvalidPrice {
            reason: reason.into(),
        }
    }

    /// Creates an invalid settings error.
    #[must_use]
    pub fn invalid_settings(reason: impl Into<String>) -> Self {
        Self::InvalidSettings {
            reason: reason.into(),
        }
    }
}
