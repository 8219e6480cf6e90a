//! Per-period chart series for presentation layers.
//!
//! One point per period `0..=n`: period 0 carries the purchase outflow,
//! periods `1..=n` split each payment into coupon and principal, and every
//! point carries the bond-equivalent yield as a flat line.

use serde::Serialize;

use ytm_core::types::BondParameters;

use crate::pricing::YieldAnalysis;

/// A single point of the chart series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// Period index; 0 is the purchase date.
    pub period: u32,
    /// Coupon received in this period.
    pub coupon: f64,
    /// Principal received in this period.
    pub principal: f64,
    /// Purchase outflow (negative price at period 0, otherwise zero).
    pub purchase: f64,
    /// Bond-equivalent yield in percent.
    pub yield_percent: f64,
}

impl ChartPoint {
    /// Net cash flow at this point.
    #[must_use]
    pub fn net(&self) -> f64 {
        self.coupon + self.principal + self.purchase
    }
}

/// Chart data for a solved bond.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    /// Points for periods `0..=n`.
    pub points: Vec<ChartPoint>,
    /// The constant yield line, in percent.
    pub yield_percent: f64,
}

impl ChartSeries {
    /// Builds the series from the parameters and their analysis.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ytm_bonds::chart::ChartSeries;
    /// use ytm_bonds::pricing::YieldSolver;
    /// use ytm_core::BondParameters;
    ///
    /// let params = BondParameters::new(97.76, 11.0088, 5.0, 100.0).unwrap();
    /// let analysis = YieldSolver::new().analyze(&params).unwrap();
    /// let chart = ChartSeries::from_analysis(&params, &analysis);
    ///
    /// assert_eq!(chart.points.len(), 11);
    /// assert_eq!(chart.points[0].purchase, -97.76);
    /// ```
    #[must_use]
    pub fn from_analysis(params: &BondParameters, analysis: &YieldAnalysis) -> Self {
        let yield_percent = analysis.bond_equivalent_yield * 100.0;

        let mut points = Vec::with_capacity(analysis.schedule.len() + 1);
        points.push(ChartPoint {
            period: 0,
            coupon: 0.0,
            principal: 0.0,
            purchase: -params.price(),
            yield_percent,
        });

        points.extend(analysis.schedule.iter().map(|cf| ChartPoint {
            period: cf.period(),
            coupon: cf.coupon_component(),
            principal: cf.principal_component(),
            purchase: 0.0,
            yield_percent,
        }));

        Self {
            points,
            yield_percent,
        }
    }

    /// Number of points, including the purchase point.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
