//! Input limits applied before bond parameters are constructed.

use serde::{Deserialize, Serialize};

use ytm_core::types::{BondParameters, DEFAULT_FACE};

use crate::error::{into_result, ConfigResult, Validate, ValidationError};

/// Slack for the half-year granularity check on `years`.
const HALF_YEAR_EPSILON: f64 = 1e-9;

/// An inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Smallest accepted value.
    pub min: f64,
    /// Largest accepted value.
    pub max: f64,
}

impl ValueRange {
    /// Creates a range.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A range that admits exactly one value.
    #[must_use]
    pub const fn fixed(value: f64) -> Self {
        Self::new(value, value)
    }

    /// Returns true if `value` lies within the range (NaN never does).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn describe(&self) -> String {
        if self.min == self.max {
            format!("must be {}", self.min)
        } else {
            format!("must be between {} and {}", self.min, self.max)
        }
    }

    fn check(&self, field: &str, label: &str, value: f64) -> Option<ValidationError> {
        if !value.is_finite() {
            return Some(ValidationError::with_rule(
                field,
                format!("{label} must be a number"),
                "finite",
            ));
        }
        if !self.contains(value) {
            return Some(ValidationError::with_rule(
                field,
                format!("{label} {}", self.describe()),
                "range",
            ));
        }
        None
    }
}

impl Validate for ValueRange {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.min.is_finite() || !self.max.is_finite() {
            errors.push(ValidationError::with_rule(
                "min",
                "Range bounds must be finite",
                "finite",
            ));
        } else if self.min > self.max {
            errors.push(ValidationError::with_rule(
                "min",
                format!("Minimum {} exceeds maximum {}", self.min, self.max),
                "ordered",
            ));
        }

        errors
    }
}

/// Raw, unchecked bond inputs as typed by a user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBondInput {
    /// Market price per 100 face.
    pub price: f64,
    /// Annual coupon rate in percent of face.
    pub coupon_rate_percent: f64,
    /// Years to maturity.
    pub years: f64,
    /// Face value.
    #[serde(default = "default_face")]
    pub face: f64,
}

fn default_face() -> f64 {
    DEFAULT_FACE
}

impl RawBondInput {
    /// Creates a raw input bundle.
    #[must_use]
    pub fn new(price: f64, coupon_rate_percent: f64, years: f64, face: f64) -> Self {
        Self {
            price,
            coupon_rate_percent,
            years,
            face,
        }
    }

    /// Builds the core parameter bundle.
    ///
    /// Only the structural checks of [`BondParameters::new`] apply here; run
    /// [`InputLimits::check`] first, or use [`InputLimits::parameters`].
    pub fn into_parameters(self) -> ConfigResult<BondParameters> {
        Ok(BondParameters::new(
            self.price,
            self.coupon_rate_percent,
            self.years,
            self.face,
        )?)
    }
}

/// Accepted ranges for each bond input.
///
/// Defaults: price 50–150, coupon 0–20%, years 0.5–10, face fixed at 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputLimits {
    /// Accepted prices.
    #[serde(default = "default_price")]
    pub price: ValueRange,
    /// Accepted coupon rates, in percent.
    #[serde(default = "default_coupon")]
    pub coupon_rate_percent: ValueRange,
    /// Accepted terms, in years.
    #[serde(default = "default_years")]
    pub years: ValueRange,
    /// Accepted face values.
    #[serde(default = "default_face_range")]
    pub face: ValueRange,
}

fn default_price() -> ValueRange {
    ValueRange::new(50.0, 150.0)
}

fn default_coupon() -> ValueRange {
    ValueRange::new(0.0, 20.0)
}

fn default_years() -> ValueRange {
    ValueRange::new(0.5, 10.0)
}

fn default_face_range() -> ValueRange {
    ValueRange::fixed(DEFAULT_FACE)
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            price: default_price(),
            coupon_rate_percent: default_coupon(),
            years: default_years(),
            face: default_face_range(),
        }
    }
}

impl InputLimits {
    /// Checks every field of `input`, returning one error per offending field.
    pub fn check(&self, input: &RawBondInput) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        errors.extend(self.price.check("price", "Price", input.price));
        errors.extend(self.coupon_rate_percent.check(
            "couponRatePercent",
            "Coupon rate",
            input.coupon_rate_percent,
        ));

        match self.years.check("years", "Years", input.years) {
            Some(err) => errors.push(err),
            None => {
                let half_years = input.years * 2.0;
                if (half_years - half_years.round()).abs() > HALF_YEAR_EPSILON {
                    errors.push(ValidationError::with_rule(
                        "years",
                        "Years must be a multiple of 0.5",
                        "half_year",
                    ));
                }
            }
        }

        errors.extend(self.face.check("face", "Face value", input.face));

        errors
    }

    /// Checks `input` and builds the parameter bundle if every field passes.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Validation`](crate::ConfigError::Validation) or
    /// [`ConfigError::MultipleValidationErrors`](crate::ConfigError::MultipleValidationErrors)
    /// carrying the field-level messages.
    pub fn parameters(&self, input: &RawBondInput) -> ConfigResult<BondParameters> {
        into_result(self.check(input))?;
        input.into_parameters()
    }
}

impl Validate for InputLimits {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let ranges = [
            ("price", &self.price),
            ("coupon_rate_percent", &self.coupon_rate_percent),
            ("years", &self.years),
            ("face", &self.face),
        ];
        for (name, range) in ranges {
            errors.extend(range.validate().into_iter().map(|e| e.nested(name)));
        }

        if self.price.min <= 0.0 {
            errors.push(ValidationError::with_rule(
                "price.min",
                "Prices must be positive",
                "positive",
            ));
        }
        if self.coupon_rate_percent.min < 0.0 {
            errors.push(ValidationError::with_rule(
                "coupon_rate_percent.min",
                "Coupon rates cannot be negative",
                "non_negative",
            ));
        }
        if self.years.min < 0.5 {
            errors.push(ValidationError::with_rule(
                "years.min",
                "Terms must be at least half a year",
                "half_year",
            ));
        }
        if self.face.min <= 0.0 {
            errors.push(ValidationError::with_rule(
                "face.min",
                "Face values must be positive",
                "positive",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use proptest::prelude::*;

    fn input(price: f64, coupon: f64, years: f64) -> RawBondInput {
        RawBondInput::new(price, coupon, years, 100.0)
    }

    #[test]
    fn test_default_limits() {
        let limits = InputLimits::default();
        assert_eq!(limits.price, ValueRange::new(50.0, 150.0));
        assert_eq!(limits.coupon_rate_percent, ValueRange::new(0.0, 20.0));
        assert_eq!(limits.years, ValueRange::new(0.5, 10.0));
        assert_eq!(limits.face, ValueRange::fixed(100.0));
        assert!(limits.is_valid());
    }

    #[test]
    fn test_reference_input_passes() {
        let limits = InputLimits::default();
        assert!(limits.check(&input(97.76, 11.0088, 5.0)).is_empty());

        let params = limits.parameters(&input(97.76, 11.0088, 5.0)).unwrap();
        assert_eq!(params.periods(), 10);
        assert_eq!(params.face(), 100.0);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let limits = InputLimits::default();
        assert!(limits.check(&input(50.0, 0.0, 0.5)).is_empty());
        assert!(limits.check(&input(150.0, 20.0, 10.0)).is_empty());
    }

    #[test]
    fn test_price_out_of_range() {
        let errors = InputLimits::default().check(&input(20.0, 5.0, 5.0));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "price");
        assert_eq!(errors[0].message, "Price must be between 50 and 150");
        assert_eq!(errors[0].rule.as_deref(), Some("range"));
    }

    #[test]
    fn test_coupon_out_of_range() {
        let errors = InputLimits::default().check(&input(100.0, 25.0, 5.0));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "couponRatePercent");
    }

    #[test]
    fn test_years_not_half_year() {
        let errors = InputLimits::default().check(&input(100.0, 5.0, 2.3));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "years");
        assert_eq!(errors[0].rule.as_deref(), Some("half_year"));
    }

    #[test]
    fn test_years_out_of_range_reports_range_only() {
        let errors = InputLimits::default().check(&input(100.0, 5.0, 12.3));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule.as_deref(), Some("range"));
    }

    #[test]
    fn test_face_fixed() {
        let errors = InputLimits::default().check(&RawBondInput::new(100.0, 5.0, 5.0, 1000.0));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "face");
        assert_eq!(errors[0].message, "Face value must be 100");
    }

    #[test]
    fn test_non_finite_input() {
        let errors = InputLimits::default().check(&input(f64::NAN, 5.0, 5.0));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule.as_deref(), Some("finite"));
    }

    #[test]
    fn test_multiple_errors() {
        let limits = InputLimits::default();
        let raw = input(10.0, 30.0, 0.0);
        assert_eq!(limits.check(&raw).len(), 3);

        let err = limits.parameters(&raw).unwrap_err();
        assert!(matches!(err, ConfigError::MultipleValidationErrors(_)));
        let fields: Vec<_> = err.validation_errors().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["price", "couponRatePercent", "years"]);
    }

    #[test]
    fn test_widened_face_range() {
        let limits = InputLimits {
            face: ValueRange::new(100.0, 1000.0),
            ..InputLimits::default()
        };
        let params = limits
            .parameters(&RawBondInput::new(975.0, 5.0, 3.0, 1000.0))
            .unwrap();
        assert_eq!(params.face(), 1000.0);
    }

    #[test]
    fn test_invalid_limits() {
        let limits = InputLimits {
            price: ValueRange::new(150.0, 50.0),
            years: ValueRange::new(0.0, 10.0),
            ..InputLimits::default()
        };
        let errors = limits.validate();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"price.min"));
        assert!(fields.contains(&"years.min"));
    }

    #[test]
    fn test_raw_input_face_defaults() {
        let raw: RawBondInput =
            toml::from_str("price = 97.76\ncouponRatePercent = 11.0088\nyears = 5.0\n").unwrap();
        assert_eq!(raw.face, 100.0);
    }

    proptest! {
        #[test]
        fn prop_in_range_inputs_build(
            price in 50.0f64..=150.0,
            coupon in 0.0f64..=20.0,
            half_years in 1u32..=20,
        ) {
            let raw = input(price, coupon, f64::from(half_years) / 2.0);
            let params = InputLimits::default().parameters(&raw).unwrap();
            prop_assert_eq!(params.periods(), half_years);
        }

        #[test]
        fn prop_price_outside_range_rejected(price in 150.0001f64..1000.0) {
            let errors = InputLimits::default().check(&input(price, 5.0, 5.0));
            prop_assert_eq!(errors.len(), 1);
            prop_assert_eq!(errors[0].field.as_str(), "price");
        }
    }
}
