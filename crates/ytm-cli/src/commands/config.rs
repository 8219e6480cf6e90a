//! Config command implementation.
//!
//! Shows the effective configuration or checks a configuration file.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use ytm_config::{Convergence, ValueRange, YieldConfig};

use super::Context;
use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_csv, print_error, print_header, print_json, print_rows, print_success, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show(FileArgs),

    /// Check a configuration file and report every invalid field
    Validate(FileArgs),
}

/// Selects a configuration file other than the active one.
#[derive(Args, Debug)]
pub struct FileArgs {
    /// Configuration file to read instead of the active one
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show(file) => show(file, ctx),
        ConfigCommand::Validate(file) => validate(file, ctx),
    }
}

fn show(args: FileArgs, ctx: &Context) -> Result<()> {
    let (config, source) = match args.file {
        Some(path) => (
            YieldConfig::from_file(&path).map_err(CliError::Config)?,
            Some(path),
        ),
        None => (*ctx.config()?, ctx.source.clone()),
    };

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                let origin = source.map_or_else(
                    || "defaults".to_string(),
                    |path| path.display().to_string(),
                );
                print_header(&format!("Configuration ({origin})"));
            }
            print_rows(&summary(&config), ctx.format)?;
        }
        OutputFormat::Json => print_json(&config)?,
        OutputFormat::Csv => print_csv(&summary(&config))?,
        OutputFormat::Minimal => {
            print!("{}", config.to_toml_string().map_err(CliError::Config)?);
        }
    }

    Ok(())
}

fn validate(args: FileArgs, ctx: &Context) -> Result<()> {
    // Read the file here rather than through the context so field errors are
    // reported instead of aborting the load.
    let Some(path) = args.file.or_else(|| ctx.source.clone()) else {
        print_success("No configuration file; built-in defaults are valid");
        return Ok(());
    };

    match YieldConfig::from_file(&path) {
        Ok(_) => {
            print_success(&format!("{} is valid", path.display()));
            Ok(())
        }
        Err(err) => {
            let errors = err.validation_errors();
            if errors.is_empty() {
                return Err(CliError::Config(err).into());
            }
            for error in &errors {
                print_error(&error.to_string());
            }
            anyhow::bail!(
                "{} failed validation with {} error(s)",
                path.display(),
                errors.len()
            )
        }
    }
}

fn summary(config: &YieldConfig) -> Vec<KeyValue> {
    let solver = &config.solver;
    let mut rows = match solver.convergence {
        Convergence::FixedIterations { iterations } => vec![
            KeyValue::new("solver.convergence.rule", "fixed_iterations"),
            KeyValue::new("solver.convergence.iterations", iterations.to_string()),
        ],
        Convergence::Converged { max_iterations } => vec![
            KeyValue::new("solver.convergence.rule", "converged"),
            KeyValue::new(
                "solver.convergence.max_iterations",
                max_iterations.to_string(),
            ),
        ],
    };

    rows.push(KeyValue::new("solver.lower_bound", solver.lower_bound.to_string()));
    rows.push(KeyValue::new("solver.upper_bound", solver.upper_bound.to_string()));
    rows.push(KeyValue::new(
        "solver.boundary_policy",
        format!("{:?}", solver.boundary_policy).to_lowercase(),
    ));

    let limits = &config.limits;
    for (name, range) in [
        ("price", limits.price),
        ("coupon_rate_percent", limits.coupon_rate_percent),
        ("years", limits.years),
        ("face", limits.face),
    ] {
        rows.push(KeyValue::new(format!("limits.{name}"), describe(range)));
    }

    rows.push(KeyValue::new(
        "display.yield_precision",
        config.display.yield_precision.to_string(),
    ));
    rows.push(KeyValue::new(
        "display.amount_precision",
        config.display.amount_precision.to_string(),
    ));

    rows
}

fn describe(range: ValueRange) -> String {
    format!("{} ..= {}", range.min, range.max)
}
