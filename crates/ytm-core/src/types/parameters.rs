//! Bond parameter bundle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{YtmError, YtmResult};

/// Default redemption value.
pub const DEFAULT_FACE: f64 = 100.0;

/// Coupon periods per year (semiannual).
pub const PERIODS_PER_YEAR: u32 = 2;

/// Longest schedule accepted, in semiannual periods (1000 years).
pub const MAX_PERIODS: u32 = 2000;

/// Slack allowed when checking that `years * 2` is whole.
const PERIOD_EPSILON: f64 = 1e-9;

/// Inputs for a single yield computation.
///
/// Fields are private: a `BondParameters` can only exist once the structural
/// invariants hold (finite values, positive price and face, non-negative
/// coupon, and a term that is a positive multiple of half a year).
///
/// Range limits on top of that (price 50–150 and so on) are applied by the
/// validation layer before construction.
///
/// # Example
///
/// ```rust
/// use ytm_core::types::BondParameters;
///
/// let params = BondParameters::new(101.25, 6.0, 7.5, 100.0).unwrap();
/// assert_eq!(params.periods(), 15);
/// assert!((params.coupon_per_period() - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "UncheckedParameters")]
pub struct BondParameters {
    price: f64,
    coupon_rate_percent: f64,
    years: f64,
    face: f64,
    #[serde(skip)]
    periods: u32,
}

impl BondParameters {
    /// Creates a validated parameter bundle.
    ///
    /// # Errors
    ///
    /// - [`YtmError::InvalidParameter`] for non-finite values, a price or face
    ///   that is not positive, or a negative coupon rate.
    /// - [`YtmError::InvalidSchedule`] when `years * 2` is not a positive
    ///   whole number.
    pub fn new(price: f64, coupon_rate_percent: f64, years: f64, face: f64) -> YtmResult<Self> {
        if !price.is_finite() || price <= 0.0 {
            return Err(YtmError::invalid_parameter(
                "price",
                price,
                "must be a positive finite number",
            ));
        }
        if !coupon_rate_percent.is_finite() || coupon_rate_percent < 0.0 {
            return Err(YtmError::invalid_parameter(
                "couponRatePercent",
                coupon_rate_percent,
                "must be a non-negative finite number",
            ));
        }
        if !face.is_finite() || face <= 0.0 {
            return Err(YtmError::invalid_parameter(
                "face",
                face,
                "must be a positive finite number",
            ));
        }

        let periods = Self::periods_for(years)?;

        Ok(Self {
            price,
            coupon_rate_percent,
            years,
            face,
            periods,
        })
    }

    /// Creates parameters with the default face value of 100.
    pub fn with_default_face(price: f64, coupon_rate_percent: f64, years: f64) -> YtmResult<Self> {
        Self::new(price, coupon_rate_percent, years, DEFAULT_FACE)
    }

    /// Returns a copy with a different price, keeping the rest of the bundle.
    pub fn with_price(&self, price: f64) -> YtmResult<Self> {
        Self::new(price, self.coupon_rate_percent, self.years, self.face)
    }

    /// Number of semiannual periods for a term in years.
    ///
    /// # Errors
    ///
    /// Returns [`YtmError::InvalidSchedule`] unless `years * 2` is a positive
    /// integer (within `1e-9`).
    pub fn periods_for(years: f64) -> YtmResult<u32> {
        if !years.is_finite() {
            return Err(YtmError::invalid_schedule(years, "term must be finite"));
        }

        let raw = years * f64::from(PERIODS_PER_YEAR);
        let whole = raw.round();

        if (raw - whole).abs() > PERIOD_EPSILON {
            return Err(YtmError::invalid_schedule(
                years,
                "term must be a multiple of 0.5 years",
            ));
        }
        if whole < 1.0 {
            return Err(YtmError::invalid_schedule(
                years,
                "term must cover at least one semiannual period",
            ));
        }
        if whole > f64::from(MAX_PERIODS) {
            return Err(YtmError::invalid_schedule(
                years,
                format!("term must not exceed {MAX_PERIODS} semiannual periods"),
            ));
        }

        Ok(whole as u32)
    }

    /// Market price per 100 face.
    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Annual coupon rate in percent of face.
    #[inline]
    pub fn coupon_rate_percent(&self) -> f64 {
        self.coupon_rate_percent
    }

    /// Term to maturity in years.
    #[inline]
    pub fn years(&self) -> f64 {
        self.years
    }

    /// Redemption value.
    #[inline]
    pub fn face(&self) -> f64 {
        self.face
    }

    /// Number of semiannual periods (`years * 2`).
    #[inline]
    pub fn periods(&self) -> u32 {
        self.periods
    }

    /// Annual coupon amount: `coupon_rate_percent / 100 * face`.
    #[inline]
    pub fn annual_coupon(&self) -> f64 {
        self.coupon_rate_percent / 100.0 * self.face
    }

    /// Coupon paid each semiannual period.
    #[inline]
    pub fn coupon_per_period(&self) -> f64 {
        self.annual_coupon() / f64::from(PERIODS_PER_YEAR)
    }

    /// Exact bit pattern of the four inputs, usable as a hash key.
    #[must_use]
    pub fn key_bits(&self) -> [u64; 4] {
        [
            self.price.to_bits(),
            self.coupon_rate_percent.to_bits(),
            self.years.to_bits(),
            self.face.to_bits(),
        ]
    }
}

impl fmt::Display for BondParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}% {}y @ {} (face {})",
            self.coupon_rate_percent, self.years, self.price, self.face
        )
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UncheckedParameters {
    price: f64,
    coupon_rate_percent: f64,
    years: f64,
    #[serde(default = "default_face")]
    face: f64,
}

fn default_face() -> f64 {
    DEFAULT_FACE
}

impl TryFrom<UncheckedParameters> for BondParameters {
    type Error = YtmError;

    fn try_from(raw: UncheckedParameters) -> YtmResult<Self> {
        Self::new(raw.price, raw.coupon_rate_percent, raw.years, raw.face)
    }
}
