//! Error types for the YTM workspace.
//!
//! These cover structural problems with inputs: values the generator and
//! solver cannot work with at all. Range limits on otherwise well-formed
//! inputs are the validation layer's concern.

use thiserror::Error;

/// A specialized Result type for YTM core operations.
pub type YtmResult<T> = Result<T, YtmError>;

/// The main error type for YTM core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum YtmError {
    /// A bond parameter is non-finite or outside its structural domain.
    #[error("Invalid {field}: {value} - {reason}")]
    InvalidParameter {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Reason for invalidity.
        reason: String,
    },

    /// The term does not map onto a whole, positive number of semiannual periods.
    #[error("Invalid schedule for {years} years: {reason}")]
    InvalidSchedule {
        /// The rejected term in years.
        years: f64,
        /// Reason for invalidity.
        reason: String,
    },

    /// Invalid cash flow or cash flow sequence.
    #[error("Invalid cash flow: {reason}")]
    InvalidCashFlow {
        /// Description of the invalid cash flow.
        reason: String,
    },
}

impl YtmError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(field: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            value,
            reason: reason.into(),
        }
    }

    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(years: f64, reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            years,
            reason: reason.into(),
        }
    }

    /// Creates an invalid cash flow error.
    #[must_use]
    pub fn invalid_cash_flow(reason: impl Into<String>) -> Self {
        Self::InvalidCashFlow {
            reason: reason.into(),
        }
    }
}
