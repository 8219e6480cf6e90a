//! Cash flow types for semiannual schedules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::error::{YtmError, YtmResult};

/// Type of cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlowType {
    /// Regular coupon payment
    Coupon,
    /// Combined coupon and principal (final payment)
    CouponAndPrincipal,
}

impl fmt::Display for CashFlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashFlowType::Coupon => "Coupon",
            CashFlowType::CouponAndPrincipal => "Coupon+Principal",
        };
        write!(f, "{name}")
    }
}

/// A single payment in a semiannual schedule.
///
/// Periods are numbered from 1; the payment for period `t` is discounted by
/// `(1 + r)^t`.
///
/// # Example
///
/// ```rust
/// use ytm_core::types::{CashFlow, CashFlowType};
///
/// let cf = CashFlow::final_payment(10, 5.5044, 100.0);
/// assert_eq!(cf.cf_type(), CashFlowType::CouponAndPrincipal);
/// assert!((cf.amount() - 105.5044).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlow {
    /// Period index, starting at 1
    period: u32,
    /// Coupon part of the payment
    coupon: f64,
    /// Principal part of the payment
    principal: f64,
    /// Type of cash flow
    cf_type: CashFlowType,
}

impl CashFlow {
    /// Creates a coupon-only cash flow.
    #[must_use]
    pub fn coupon(period: u32, amount: f64) -> Self {
        Self {
            period,
            coupon: amount,
            principal: 0.0,
            cf_type: CashFlowType::Coupon,
        }
    }

    /// Creates a final cash flow (coupon + principal).
    #[must_use]
    pub fn final_payment(period: u32, coupon: f64, principal: f64) -> Self {
        Self {
            period,
            coupon,
            principal,
            cf_type: CashFlowType::CouponAndPrincipal,
        }
    }

    /// Returns the period index.
    #[inline]
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Returns the total payment.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.coupon + self.principal
    }

    /// Returns the coupon part of the payment.
    #[inline]
    pub fn coupon_component(&self) -> f64 {
        self.coupon
    }

    /// Returns the principal part of the payment.
    #[inline]
    pub fn principal_component(&self) -> f64 {
        self.principal
    }

    /// Returns the cash flow type.
    #[inline]
    pub fn cf_type(&self) -> CashFlowType {
        self.cf_type
    }

    /// Returns true if this flow repays principal.
    #[inline]
    pub fn is_principal(&self) -> bool {
        self.cf_type == CashFlowType::CouponAndPrincipal
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.period, self.amount(), self.cf_type)
    }
}

/// An ordered semiannual cash flow schedule.
///
/// The schedule holds future payments only; the purchase outflow at period 0
/// is not part of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CashFlowSchedule {
    flows: Vec<CashFlow>,
}

impl CashFlowSchedule {
    /// Creates an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self { flows: Vec::new() }
    }

    /// Creates an empty schedule with room for `capacity` flows.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            flows: Vec::with_capacity(capacity),
        }
    }

    /// Builds a schedule from externally assembled flows.
    ///
    /// # Errors
    ///
    /// Returns [`YtmError::InvalidCashFlow`] if the flows are empty, are not
    /// numbered `1..=n` in order, or contain negative or non-finite amounts.
    /// Non-negative amounts keep the present value strictly decreasing in
    /// the discount rate.
    pub fn try_from_flows(flows: Vec<CashFlow>) -> YtmResult<Self> {
        if flows.is_empty() {
            return Err(YtmError::invalid_cash_flow("schedule has no cash flows"));
        }

        for (index, cf) in flows.iter().enumerate() {
            let expected = index as u32 + 1;
            if cf.period != expected {
                return Err(YtmError::invalid_cash_flow(format!(
                    "expected period {expected}, found {}",
                    cf.period
                )));
            }
            let amount = cf.amount();
            if !amount.is_finite() || cf.coupon < 0.0 || cf.principal < 0.0 {
                return Err(YtmError::invalid_cash_flow(format!(
                    "period {} has invalid amount {amount}",
                    cf.period
                )));
            }
        }

        Ok(Self { flows })
    }

    /// Appends a cash flow.
    pub fn push(&mut self, cf: CashFlow) {
        self.flows.push(cf);
    }

    /// Returns the number of cash flows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Returns true if the schedule is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Returns the number of periods covered.
    #[must_use]
    pub fn periods(&self) -> u32 {
        self.flows.last().map_or(0, CashFlow::period)
    }

    /// Returns an iterator over the cash flows.
    pub fn iter(&self) -> impl Iterator<Item = &CashFlow> {
        self.flows.iter()
    }

    /// Returns the flows as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[CashFlow] {
        &self.flows
    }

    /// Returns the payment amounts in period order.
    #[must_use]
    pub fn amounts(&self) -> Vec<f64> {
        self.flows.iter().map(CashFlow::amount).collect()
    }

    /// Returns the last (principal-bearing) flow.
    #[must_use]
    pub fn final_flow(&self) -> Option<&CashFlow> {
        self.flows.last()
    }

    /// Returns the undiscounted sum of all payments.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.flows.iter().map(CashFlow::amount).sum()
    }
}

impl Index<usize> for CashFlowSchedule {
    type Output = CashFlow;

    fn index(&self, index: usize) -> &Self::Output {
        &self.flows[index]
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a CashFlow;
    type IntoIter = std::slice::Iter<'a, CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}
