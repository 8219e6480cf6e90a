//! CLI command implementations.

pub mod chart;
pub mod config;
pub mod schedule;
pub mod solve;

pub use chart::ChartArgs;
pub use config::ConfigArgs;
pub use schedule::ScheduleArgs;
pub use solve::SolveArgs;

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;

use ytm_bonds::YieldSolver;
use ytm_config::{RawBondInput, YieldConfig};
use ytm_core::types::{BondParameters, DEFAULT_FACE};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Bond inputs shared by the computing commands.
#[derive(Args, Debug, Clone, Copy)]
pub struct BondArgs {
    /// Market price per 100 face
    #[arg(short, long)]
    pub price: f64,

    /// Annual coupon rate (as percentage, e.g., 5.0 for 5%)
    #[arg(short, long)]
    pub coupon: f64,

    /// Years to maturity, in half-year steps
    #[arg(short, long)]
    pub years: f64,

    /// Face value
    #[arg(long, default_value_t = DEFAULT_FACE)]
    pub face: f64,
}

impl BondArgs {
    fn raw(&self) -> RawBondInput {
        RawBondInput::new(self.price, self.coupon, self.years, self.face)
    }
}

/// Settings shared by every command.
///
/// The configuration file is only read when a command first asks for it, so
/// `config validate` can report on a file that does not load.
#[derive(Debug, Clone)]
pub struct Context {
    pub format: OutputFormat,
    pub quiet: bool,
    /// File the configuration comes from, if any.
    pub source: Option<PathBuf>,
    config: OnceCell<YieldConfig>,
}

impl Context {
    /// Selects `path`, or `<config dir>/ytm/config.toml` when that exists, as
    /// the configuration source. Without either, defaults apply.
    pub fn new(format: OutputFormat, quiet: bool, path: Option<&Path>) -> Self {
        let source = path.map(Path::to_path_buf).or_else(default_config_path);
        debug!(source = ?source, "configuration source selected");

        Self {
            format,
            quiet,
            source,
            config: OnceCell::new(),
        }
    }

    /// The active configuration, read from the source on first use.
    pub fn config(&self) -> CliResult<&YieldConfig> {
        if let Some(config) = self.config.get() {
            return Ok(config);
        }

        let config = match self.source {
            Some(ref file) => YieldConfig::from_file(file).map_err(CliError::Config)?,
            None => YieldConfig::default(),
        };
        debug!("configuration ready");

        Ok(self.config.get_or_init(|| config))
    }

    /// Applies the input limits and builds the parameter bundle.
    pub fn parameters(&self, args: &BondArgs) -> CliResult<BondParameters> {
        Ok(self.config()?.limits.parameters(&args.raw())?)
    }

    /// Builds the configured solver.
    pub fn solver(&self) -> CliResult<YieldSolver> {
        self.config()?.build_solver().map_err(CliError::Config)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("ytm").join("config.toml"))
        .filter(|path| path.is_file())
}
