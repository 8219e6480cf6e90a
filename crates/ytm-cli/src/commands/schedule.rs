//! Schedule command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use ytm_bonds::cashflows::CashFlowGenerator;

use super::{BondArgs, Context};
use crate::cli::OutputFormat;
use crate::output::{format_fixed, print_csv, print_header, print_json, print_rows};

/// Arguments for the schedule command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub bond: BondArgs,
}

#[derive(Debug, Serialize, Tabled)]
struct ScheduleRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Coupon")]
    coupon: String,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Execute the schedule command.
pub fn execute(args: ScheduleArgs, ctx: &Context) -> Result<()> {
    let params = ctx.parameters(&args.bond)?;
    let schedule = CashFlowGenerator::generate(&params);
    let precision = ctx.config()?.display.amount_precision;

    match ctx.format {
        OutputFormat::Table => {
            let mut rows: Vec<ScheduleRow> = schedule
                .iter()
                .map(|cf| ScheduleRow {
                    period: cf.period().to_string(),
                    kind: cf.cf_type().to_string(),
                    coupon: format_fixed(cf.coupon_component(), precision),
                    principal: format_fixed(cf.principal_component(), precision),
                    amount: format_fixed(cf.amount(), precision),
                })
                .collect();
            rows.push(ScheduleRow {
                period: "Total".to_string(),
                kind: String::new(),
                coupon: String::new(),
                principal: String::new(),
                amount: format_fixed(schedule.total(), precision),
            });

            if !ctx.quiet {
                print_header(&format!("Cash Flows: {params}"));
            }
            print_rows(&rows, ctx.format)?;
        }
        OutputFormat::Json => print_json(&schedule)?,
        OutputFormat::Csv => print_csv(schedule.as_slice())?,
        OutputFormat::Minimal => {
            for amount in schedule.amounts() {
                println!("{}", format_fixed(amount, precision));
            }
        }
    }

    Ok(())
}
