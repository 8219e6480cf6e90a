//! Solver and display settings, and the top-level configuration file.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use ytm_bonds::pricing::{BoundaryPolicy, DEFAULT_LOWER_BOUND, DEFAULT_UPPER_BOUND};
use ytm_bonds::YieldSolver;
use ytm_math::solvers::{DEFAULT_FIXED_STEPS, DEFAULT_MAX_ITERATIONS};

use crate::error::{ConfigResult, Validate, ValidationError};
use crate::limits::InputLimits;

/// Largest number of decimal places accepted for display.
const MAX_PRECISION: u32 = 12;

/// Bisection stopping rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Convergence {
    /// Always run exactly `iterations` halvings.
    FixedIterations {
        /// Number of halvings.
        iterations: u32,
    },
    /// Stop once the midpoint no longer splits the rate interval. Returns
    /// the same rate as the fixed 200-step run, in fewer halvings.
    Converged {
        /// Upper limit on halvings; at least 200.
        max_iterations: u32,
    },
}

impl Default for Convergence {
    fn default() -> Self {
        Convergence::FixedIterations {
            iterations: DEFAULT_FIXED_STEPS,
        }
    }
}

impl Convergence {
    /// The early-exit rule with the library's iteration cap.
    #[must_use]
    pub fn converged() -> Self {
        Convergence::Converged {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Yield solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Stopping rule.
    #[serde(default)]
    pub convergence: Convergence,

    /// Lower per-period rate bound.
    #[serde(default = "default_lower_bound")]
    pub lower_bound: f64,

    /// Upper per-period rate bound.
    #[serde(default = "default_upper_bound")]
    pub upper_bound: f64,

    /// Handling of yields outside the bounds.
    #[serde(default)]
    pub boundary_policy: BoundaryPolicy,
}

fn default_lower_bound() -> f64 {
    DEFAULT_LOWER_BOUND
}

fn default_upper_bound() -> f64 {
    DEFAULT_UPPER_BOUND
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            convergence: Convergence::default(),
            lower_bound: default_lower_bound(),
            upper_bound: default_upper_bound(),
            boundary_policy: BoundaryPolicy::default(),
        }
    }
}

impl SolverSettings {
    /// Builds the configured solver.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the settings fail [`Validate`].
    pub fn build_solver(&self) -> ConfigResult<YieldSolver> {
        self.validate_or_error()?;

        let solver = YieldSolver::new()
            .with_bounds(self.lower_bound, self.upper_bound)
            .with_boundary_policy(self.boundary_policy);
        let solver = match self.convergence {
            Convergence::FixedIterations { iterations } => solver.with_fixed_iterations(iterations),
            Convergence::Converged { max_iterations } => solver.with_early_exit(max_iterations),
        };
        solver.validate()?;

        Ok(solver)
    }
}

impl Validate for SolverSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        match self.convergence {
            Convergence::FixedIterations { iterations } => {
                if iterations == 0 {
                    errors.push(ValidationError::with_rule(
                        "convergence.iterations",
                        "At least one iteration is required",
                        "positive",
                    ));
                }
            }
            Convergence::Converged { max_iterations } => {
                if max_iterations < DEFAULT_FIXED_STEPS {
                    errors.push(ValidationError::with_rule(
                        "convergence.max_iterations",
                        format!("At least {DEFAULT_FIXED_STEPS} iterations are required"),
                        "precision",
                    ));
                }
            }
        }

        if !self.lower_bound.is_finite() || !self.upper_bound.is_finite() {
            errors.push(ValidationError::with_rule(
                "lower_bound",
                "Bounds must be finite",
                "finite",
            ));
        } else {
            if self.lower_bound <= -1.0 {
                errors.push(ValidationError::with_rule(
                    "lower_bound",
                    "Lower bound must be above -1",
                    "range",
                ));
            }
            if self.lower_bound >= self.upper_bound {
                errors.push(ValidationError::with_rule(
                    "upper_bound",
                    "Upper bound must exceed lower bound",
                    "ordered",
                ));
            }
        }

        errors
    }
}

/// Output formatting settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Decimal places for yields shown in percent.
    #[serde(default = "default_yield_precision")]
    pub yield_precision: u32,

    /// Decimal places for cash-flow amounts.
    #[serde(default = "default_amount_precision")]
    pub amount_precision: u32,
}

fn default_yield_precision() -> u32 {
    2
}

fn default_amount_precision() -> u32 {
    4
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            yield_precision: default_yield_precision(),
            amount_precision: default_amount_precision(),
        }
    }
}

impl Validate for DisplaySettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (field, value) in [
            ("yield_precision", self.yield_precision),
            ("amount_precision", self.amount_precision),
        ] {
            if value > MAX_PRECISION {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("At most {MAX_PRECISION} decimal places are supported"),
                    "range",
                ));
            }
        }
        errors
    }
}

/// Complete configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct YieldConfig {
    /// Solver settings.
    #[serde(default)]
    pub solver: SolverSettings,

    /// Input limits.
    #[serde(default)]
    pub limits: InputLimits,

    /// Display settings.
    #[serde(default)]
    pub display: DisplaySettings,
}

impl YieldConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Builds the configured solver.
    pub fn build_solver(&self) -> ConfigResult<YieldSolver> {
        self.solver.build_solver()
    }
}

impl Validate for YieldConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let solver = self.solver.validate().into_iter().map(|e| e.nested("solver"));
        let limits = self.limits.validate().into_iter().map(|e| e.nested("limits"));
        let display = self.display.validate().into_iter().map(|e| e.nested("display"));
        solver.chain(limits).chain(display).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = YieldConfig::default();
        assert!(config.is_valid());
        assert_eq!(
            config.solver.convergence,
            Convergence::FixedIterations { iterations: 200 }
        );
        assert_eq!(config.solver.lower_bound, 0.0);
        assert_eq!(config.solver.upper_bound, 1.0);
        assert_eq!(config.solver.boundary_policy, BoundaryPolicy::Clamp);
        assert_eq!(config.display.yield_precision, 2);
        assert_eq!(config.display.amount_precision, 4);
    }

    #[test]
    fn test_default_solver_matches_library_default() {
        let solver = YieldConfig::default().build_solver().unwrap();
        assert_eq!(solver, YieldSolver::new());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = YieldConfig::from_toml_str("").unwrap();
        assert_eq!(config, YieldConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = YieldConfig::from_toml_str(
            r#"
            [solver]
            boundary_policy = "reject"

            [solver.convergence]
            rule = "converged"
            max_iterations = 500

            [limits.face]
            min = 100.0
            max = 1000.0

            [display]
            yield_precision = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.solver.boundary_policy, BoundaryPolicy::Reject);
        assert_eq!(
            config.solver.convergence,
            Convergence::Converged {
                max_iterations: 500
            }
        );
        assert_eq!(config.solver.upper_bound, 1.0);
        assert_eq!(config.limits.face.max, 1000.0);
        assert_eq!(config.limits.price.min, 50.0);
        assert_eq!(config.display.yield_precision, 4);
        assert_eq!(config.display.amount_precision, 4);

        let solver = config.build_solver().unwrap();
        assert_eq!(solver.boundary_policy(), BoundaryPolicy::Reject);
        assert!(solver.config().early_exit);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = YieldConfig {
            solver: SolverSettings {
                convergence: Convergence::converged(),
                ..SolverSettings::default()
            },
            ..YieldConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(YieldConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_short_early_exit_cap_rejected() {
        let settings = SolverSettings {
            convergence: Convergence::Converged {
                max_iterations: 100,
            },
            ..SolverSettings::default()
        };
        let errors = settings.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "convergence.max_iterations");
        assert_eq!(errors[0].rule.as_deref(), Some("precision"));
        assert!(settings.build_solver().is_err());
    }

    #[test]
    fn test_converged_rule_matches_default_solver() {
        let settings = SolverSettings {
            convergence: Convergence::converged(),
            ..SolverSettings::default()
        };
        let params = ytm_core::BondParameters::new(97.76, 11.0088, 5.0, 100.0).unwrap();

        let fixed = SolverSettings::default().build_solver().unwrap().analyze(&params).unwrap();
        let early = settings.build_solver().unwrap().analyze(&params).unwrap();

        assert_eq!(early.period_rate, fixed.period_rate);
        assert!(early.result.iterations < fixed.result.iterations);
    }

    #[test]
    fn test_tolerance_rule_no_longer_accepted() {
        let err = YieldConfig::from_toml_str(
            "[solver.convergence]\nrule = \"tolerance\"\ntolerance = 1e-12\nmax_iterations = 200\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization(_)));
    }

    #[test]
    fn test_invalid_bounds() {
        let settings = SolverSettings {
            lower_bound: -2.0,
            upper_bound: -3.0,
            ..SolverSettings::default()
        };
        let fields: Vec<_> = settings.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["lower_bound", "upper_bound"]);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let settings = SolverSettings {
            convergence: Convergence::FixedIterations { iterations: 0 },
            ..SolverSettings::default()
        };
        assert!(!settings.is_valid());
    }

    #[test]
    fn test_nested_field_names() {
        let err = YieldConfig::from_toml_str("[display]\nyield_precision = 40\n").unwrap_err();
        match err {
            ConfigError::Validation { field, .. } => assert_eq!(field, "display.yield_precision"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_document() {
        let err = YieldConfig::from_toml_str("[solver\n").unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization(_)));

        let err = YieldConfig::from_toml_str("[solver.convergence]\nrule = \"newton\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nyield_precision = 6").unwrap();

        let config = YieldConfig::from_file(file.path()).unwrap();
        assert_eq!(config.display.yield_precision, 6);
    }

    #[test]
    fn test_missing_file() {
        let err = YieldConfig::from_file("/nonexistent/ytm.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
