//! Cash flow generation for semiannual bonds.

use log::trace;

use ytm_core::types::{BondParameters, CashFlow, CashFlowSchedule};

/// Generates cash flows for bonds.
pub struct CashFlowGenerator;

impl CashFlowGenerator {
    /// Generates the semiannual cash flow schedule for a bond.
    ///
    /// Periods `1..n-1` pay the semiannual coupon `c / 2` with
    /// `c = coupon_rate_percent / 100 * face`; period `n` pays `c / 2 + face`.
    /// The purchase outflow is not part of the schedule, and the price in
    /// `params` is not used.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ytm_bonds::cashflows::CashFlowGenerator;
    /// use ytm_core::BondParameters;
    ///
    /// let params = BondParameters::new(98.0, 4.0, 1.5, 100.0).unwrap();
    /// let schedule = CashFlowGenerator::generate(&params);
    ///
    /// assert_eq!(schedule.len(), 3);
    /// assert!((schedule.total() - 106.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn generate(params: &BondParameters) -> CashFlowSchedule {
        let periods = params.periods();
        let coupon_amount = params.coupon_per_period();

        let mut schedule = CashFlowSchedule::with_capacity(periods as usize);

        for period in 1..periods {
            schedule.push(CashFlow::coupon(period, coupon_amount));
        }

        // Final payment includes principal
        schedule.push(CashFlow::final_payment(periods, coupon_amount, params.face()));

        trace!("generated {periods} cash flows for {params}");
        schedule
    }
}
