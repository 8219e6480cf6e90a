//! Configuration error types.

use thiserror::Error;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Validation error.
    #[error("Validation error: {field}: {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Multiple validation errors.
    #[error("Multiple validation errors: {}", join_errors(.0))]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Reading a configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] ytm_core::YtmError),

    /// Solver construction error.
    #[error("Solver error: {0}")]
    Solver(#[from] ytm_bonds::BondError),
}

impl ConfigError {
    /// Returns the field-level errors carried by a validation failure.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        match self {
            ConfigError::Validation { field, message } => {
                vec![ValidationError::new(field.clone(), message.clone())]
            }
            ConfigError::MultipleValidationErrors(errors) => errors.clone(),
            _ => Vec::new(),
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }

    /// Returns a copy with `prefix.` prepended to the field name.
    #[must_use]
    pub fn nested(mut self, prefix: &str) -> Self {
        self.field = format!("{prefix}.{}", self.field);
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Deserialization(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialization(err.to_string())
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Validates the configuration.
    ///
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> ConfigResult<()> {
        into_result(self.validate())
    }
}

/// Turns a list of validation errors into a result.
pub(crate) fn into_result(mut errors: Vec<ValidationError>) -> ConfigResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => {
            let err = errors.remove(0);
            Err(ConfigError::Validation {
                field: err.field,
                message: err.message,
            })
        }
        _ => Err(ConfigError::MultipleValidationErrors(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let plain = ValidationError::new("price", "must be between 50 and 150");
        assert_eq!(plain.to_string(), "price: must be between 50 and 150");

        let ruled = ValidationError::with_rule("years", "must be a multiple of 0.5", "half_year");
        assert_eq!(
            ruled.to_string(),
            "years: must be a multiple of 0.5 (rule: half_year)"
        );
    }

    #[test]
    fn test_nested_field() {
        let err = ValidationError::new("min", "must be finite").nested("limits.price");
        assert_eq!(err.field, "limits.price.min");
    }

    #[test]
    fn test_into_result() {
        assert!(into_result(Vec::new()).is_ok());

        let single = into_result(vec![ValidationError::new("price", "bad")]).unwrap_err();
        assert!(matches!(single, ConfigError::Validation { .. }));
        assert_eq!(single.validation_errors().len(), 1);

        let many = into_result(vec![
            ValidationError::new("price", "bad"),
            ValidationError::new("years", "bad"),
        ])
        .unwrap_err();
        assert_eq!(many.validation_errors().len(), 2);
        assert!(many.to_string().contains("price: bad; years: bad"));
    }
}
