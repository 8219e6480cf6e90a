//! Chart command implementation.
//!
//! Emits the per-period series a chart front end plots: the purchase outflow
//! at period 0, coupon and principal bars, and the flat yield line.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use ytm_bonds::chart::ChartSeries;

use super::{BondArgs, Context};
use crate::cli::OutputFormat;
use crate::output::{format_fixed, print_csv, print_header, print_json, print_rows};

/// Arguments for the chart command.
#[derive(Args, Debug)]
pub struct ChartArgs {
    #[command(flatten)]
    pub bond: BondArgs,
}

#[derive(Debug, Serialize, Tabled)]
struct ChartRow {
    #[tabled(rename = "Period")]
    period: u32,
    #[tabled(rename = "Purchase")]
    purchase: String,
    #[tabled(rename = "Coupon")]
    coupon: String,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Yield %")]
    yield_percent: String,
}

/// Execute the chart command.
pub fn execute(args: ChartArgs, ctx: &Context) -> Result<()> {
    let params = ctx.parameters(&args.bond)?;
    let analysis = ctx.solver()?.analyze(&params)?;
    let series = ChartSeries::from_analysis(&params, &analysis);

    let display = ctx.config()?.display;
    match ctx.format {
        OutputFormat::Table => {
            let rows: Vec<ChartRow> = series
                .points
                .iter()
                .map(|p| ChartRow {
                    period: p.period,
                    purchase: format_fixed(p.purchase, display.amount_precision),
                    coupon: format_fixed(p.coupon, display.amount_precision),
                    principal: format_fixed(p.principal, display.amount_precision),
                    net: format_fixed(p.net(), display.amount_precision),
                    yield_percent: format_fixed(p.yield_percent, display.yield_precision),
                })
                .collect();

            if !ctx.quiet {
                print_header(&format!("Chart Series: {params}"));
            }
            print_rows(&rows, ctx.format)?;
        }
        OutputFormat::Json => print_json(&series)?,
        OutputFormat::Csv => print_csv(&series.points)?,
        OutputFormat::Minimal => {
            for point in &series.points {
                println!(
                    "{},{}",
                    point.period,
                    format_fixed(point.net(), display.amount_precision)
                );
            }
        }
    }

    Ok(())
}
