//! YTM CLI - Yield to maturity from price, coupon and term.
//!
//! # Usage
//!
//! ```bash
//! # Solve for the yield
//! ytm solve --price 97.76 --coupon 11.0088 --years 5
//!
//! # Show the cash-flow schedule
//! ytm schedule --price 97.76 --coupon 11.0088 --years 5
//!
//! # Chart series as JSON
//! ytm --format json chart --price 97.76 --coupon 11.0088 --years 5
//!
//! # Inspect or check a configuration file
//! ytm config show
//! ytm config validate --file ytm.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let ctx = Context::new(cli.format, cli.quiet, cli.config.as_deref());

    match cli.command {
        Commands::Solve(args) => commands::solve::execute(args, &ctx)?,
        Commands::Schedule(args) => commands::schedule::execute(args, &ctx)?,
        Commands::Chart(args) => commands::chart::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// Installs the stderr subscriber. `-v` overrides `RUST_LOG`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
