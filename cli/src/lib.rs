//! bwfilter CLI - Argument Parsing and Startup
//!
//! This module parses the command line, resolves the design configuration
//! and hands off to the command handlers.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use bwfilter_core::{DesignConfig, FilterKind};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Butterworth IIR filter design and file filtering
#[derive(Debug, Parser)]
#[command(name = "bwfilter", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filter a sample file through low-pass, high-pass, band-stop and band-pass
    Filter {
        /// Comma/newline-delimited sample file
        input: PathBuf,

        /// Output file (default: <input stem>_filtered.<ext> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        design: DesignArgs,
    },

    /// Print designed coefficients as JSON
    Design {
        /// Only print this filter (default: all four)
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,

        #[command(flatten)]
        design: DesignArgs,
    },

    /// Print the effective configuration, optionally saving it as the default
    Config {
        /// Store the configuration in the platform settings location
        #[arg(long)]
        save: bool,

        #[command(flatten)]
        design: DesignArgs,
    },
}

/// Design parameters shared by every command; flags override the config file
#[derive(Debug, Clone, Default, Args)]
pub struct DesignArgs {
    /// JSON design configuration (default: platform settings file)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Butterworth order
    #[arg(long)]
    pub order: Option<usize>,

    /// Sample rate in Hz
    #[arg(long)]
    pub sample_rate: Option<f64>,

    /// Low/high-pass cutoff and band center in Hz
    #[arg(long)]
    pub cutoff: Option<f64>,

    /// Band filter width in Hz
    #[arg(long)]
    pub bandwidth: Option<f64>,
}

impl DesignArgs {
    /// Load the base configuration and apply flag overrides
    pub fn resolve(&self) -> Result<DesignConfig> {
        let base = match &self.config {
            Some(path) => DesignConfig::load_from(path)
                .with_context(|| format!("loading design configuration {:?}", path))?,
            None => DesignConfig::load(),
        };
        let config = self.apply(base);
        config.validate()?;
        Ok(config)
    }

    /// Apply flag overrides on top of `base`
    pub fn apply(&self, base: DesignConfig) -> DesignConfig {
        DesignConfig {
            order: self.order.unwrap_or(base.order),
            sample_rate: self.sample_rate.unwrap_or(base.sample_rate),
            cutoff_hz: self.cutoff.unwrap_or(base.cutoff_hz),
            bandwidth_hz: self.bandwidth.unwrap_or(base.bandwidth_hz),
        }
    }
}

/// Filter kind as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    LowPass,
    HighPass,
    BandStop,
    BandPass,
}

impl From<KindArg> for FilterKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::LowPass => FilterKind::LowPass,
            KindArg::HighPass => FilterKind::HighPass,
            KindArg::BandStop => FilterKind::BandStop,
            KindArg::BandPass => FilterKind::BandPass,
        }
    }
}

/// Parse arguments, set up logging and run the requested command
pub fn run() -> Result<()> {
    // RUST_LOG wins over the default filter
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bwfilter=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Starting bwfilter");

    match cli.command {
        Command::Filter {
            input,
            output,
            design,
        } => {
            let config = design.resolve()?;
            let report = commands::filter_file(input, output, config)?;
            println!("{}", report.output.display());
        }
        Command::Design { kind, design } => {
            let config = design.resolve()?;
            let json = commands::design_json(&config, kind.map(FilterKind::from))?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Command::Config { save, design } => {
            let config = design.resolve()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            if save {
                let path = config.save().context("saving design configuration")?;
                info!("Saved configuration to {:?}", path);
            }
        }
    }

    Ok(())
}
