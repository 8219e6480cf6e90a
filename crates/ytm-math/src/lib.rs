//! # YTM Math
//!
//! Root-finding utilities for the YTM semiannual yield workspace.
//!
//! This crate provides:
//!
//! - **Monotone bisection**: Halving search for functions known to be monotone,
//!   with either a fixed step count or an early-exit rule that stops at
//!   `f64` resolution.
//!   Roots outside the search interval converge onto the nearest bound.
//! - **Bracketed bisection**: Classic sign-change bisection that rejects
//!   intervals which do not bracket a root.
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: A fixed step count reproduces the same last digit on
//!   every run
//! - **Total**: Under the fixed and converged rules the monotone variant has
//!   no convergence failure path

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, monotone_bisection, Monotonicity, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
