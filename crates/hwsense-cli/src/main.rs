//! hwsense
//!
//! CLI that scans the host for hwmon devices and prints their sensors.

mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hwsense::Scanner;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "hwsense")]
#[command(about = "Print hardware monitoring sensor readings")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip devices whose directory cannot be read instead of failing
    #[arg(long)]
    skip_inaccessible: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan all devices and print their sensors
    Scan {
        /// Output format (defaults to the configured format)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// List the device paths matched by the discovery patterns
    Discover,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout is reserved for results
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            info!("Loaded configuration from: {}", path.display());
            config
        }
        None => Config::default(),
    };

    let scanner = Scanner::new()
        .with_patterns(config.patterns.iter().cloned())
        .skip_inaccessible(cli.skip_inaccessible || config.skip_inaccessible);
    debug!("Discovery patterns: {:?}", scanner.patterns());

    match cli.command {
        Commands::Scan { format } => handle_scan(&scanner, format.unwrap_or(config.format)),
        Commands::Discover => handle_discover(&scanner),
    }
}

fn handle_scan(scanner: &Scanner, format: OutputFormat) -> Result<()> {
    let devices = scanner.scan().context("Failed to scan for devices")?;
    if devices.is_empty() {
        info!("No hwmon devices found");
    }

    print!("{}", output::render(&devices, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn handle_discover(scanner: &Scanner) -> Result<()> {
    let paths = scanner
        .discover()
        .context("Failed to expand discovery patterns")?;
    for path in paths {
        println!("{}", path.display());
    }
    Ok(())
}
