//! YTM Configuration Layer
//!
//! This crate sits between raw user input and the yield solver. It supplies
//! the range checks the core deliberately leaves out, and the settings that
//! select the solver's stopping rule, search interval and display precision.
//!
//! # Features
//!
//! - **Input limits**: Field-level range checks (price 50–150, coupon 0–20%,
//!   years 0.5–10 in half-year steps, face 100)
//! - **Solver settings**: Fixed-step or early-exit bisection, search
//!   interval, boundary policy
//! - **Display settings**: Decimal places for yields and amounts
//! - **TOML loading**: Every field has a default, so partial files work
//!
//! # Example
//!
//! ```rust
//! use ytm_config::{InputLimits, RawBondInput, YieldConfig};
//!
//! let config = YieldConfig::default();
//!
//! let input = RawBondInput::new(97.76, 11.0088, 5.0, 100.0);
//! let params = config.limits.parameters(&input).unwrap();
//! assert_eq!(params.periods(), 10);
//!
//! let too_cheap = RawBondInput::new(20.0, 11.0088, 5.0, 100.0);
//! let errors = InputLimits::default().check(&too_cheap);
//! assert_eq!(errors[0].field, "price");
//! ```
//!
//! # TOML Layout
//!
//! ```toml
//! [solver]
//! boundary_policy = "clamp"
//! lower_bound = 0.0
//! upper_bound = 1.0
//!
//! [solver.convergence]
//! rule = "fixed_iterations"
//! iterations = 200
//!
//! [limits.price]
//! min = 50.0
//! max = 150.0
//!
//! [display]
//! yield_precision = 2
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod limits;
mod settings;

// Re-export core types
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use limits::{InputLimits, RawBondInput, ValueRange};
pub use settings::{Convergence, DisplaySettings, SolverSettings, YieldConfig};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
    pub use crate::limits::{InputLimits, RawBondInput};
    pub use crate::settings::{Convergence, DisplaySettings, SolverSettings, YieldConfig};
}
