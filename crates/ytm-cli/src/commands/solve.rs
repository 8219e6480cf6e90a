//! Solve command implementation.
//!
//! Finds the yield to maturity for a price, coupon and term.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::info;

use ytm_bonds::pricing::BoundaryPolicy;
use ytm_bonds::YieldAnalysis;
use ytm_core::types::BondParameters;

use super::{BondArgs, Context};
use crate::cli::OutputFormat;
use crate::output::{
    format_fixed, print_csv, print_header, print_json, print_rows, print_warning, KeyValue,
};

/// Arguments for the solve command.
#[derive(Args, Debug)]
pub struct SolveArgs {
    #[command(flatten)]
    pub bond: BondArgs,

    /// Fail instead of clamping when the yield lies outside the search interval
    #[arg(long)]
    pub reject: bool,
}

/// One CSV record per solve.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveRecord {
    price: f64,
    coupon_rate_percent: f64,
    years: f64,
    face: f64,
    periods: u32,
    period_rate: f64,
    bond_equivalent_yield: f64,
    effective_annual_rate: f64,
    iterations: u32,
    at_boundary: bool,
}

impl SolveRecord {
    fn new(params: &BondParameters, analysis: &YieldAnalysis) -> Self {
        Self {
            price: params.price(),
            coupon_rate_percent: params.coupon_rate_percent(),
            years: params.years(),
            face: params.face(),
            periods: analysis.periods,
            period_rate: analysis.period_rate,
            bond_equivalent_yield: analysis.bond_equivalent_yield,
            effective_annual_rate: analysis.effective_annual_rate,
            iterations: analysis.result.iterations,
            at_boundary: analysis.result.at_boundary,
        }
    }
}

/// Execute the solve command.
pub fn execute(args: SolveArgs, ctx: &Context) -> Result<()> {
    let params = ctx.parameters(&args.bond)?;

    let mut solver = ctx.solver()?;
    if args.reject {
        solver = solver.with_boundary_policy(BoundaryPolicy::Reject);
    }

    let analysis = solver.analyze(&params)?;
    info!(
        bond = %params,
        bey = analysis.bond_equivalent_yield,
        iterations = analysis.result.iterations,
        "solved"
    );

    if analysis.result.at_boundary && !ctx.quiet {
        let (lower, upper) = solver.bounds();
        print_warning(&format!(
            "Yield clamped to the search interval [{lower}, {upper}] per period; \
             the price implies a rate outside it"
        ));
    }

    let display = ctx.config()?.display;
    match ctx.format {
        OutputFormat::Table => {
            let rows = vec![
                KeyValue::fixed("Price", params.price(), display.amount_precision),
                KeyValue::new("Coupon Rate", format!("{}%", params.coupon_rate_percent())),
                KeyValue::new("Years", params.years().to_string()),
                KeyValue::fixed("Face Value", params.face(), display.amount_precision),
                KeyValue::new("Periods", analysis.periods.to_string()),
                KeyValue::percent(
                    "Period Rate",
                    analysis.period_rate,
                    display.yield_precision,
                ),
                KeyValue::percent(
                    "Bond-Equivalent Yield",
                    analysis.bond_equivalent_yield,
                    display.yield_precision,
                ),
                KeyValue::percent(
                    "Effective Annual Rate",
                    analysis.effective_annual_rate,
                    display.yield_precision,
                ),
            ];
            if !ctx.quiet {
                print_header("Yield to Maturity");
            }
            print_rows(&rows, ctx.format)?;
        }
        OutputFormat::Json => print_json(&analysis)?,
        OutputFormat::Csv => print_csv(&[SolveRecord::new(&params, &analysis)])?,
        OutputFormat::Minimal => {
            println!(
                "{}",
                format_fixed(analysis.result.bey_percent(), display.yield_precision)
            );
        }
    }

    Ok(())
}
