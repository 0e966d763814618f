//! Radio image analysis tool.
//!
//! Reads JSON dumps of already-decoded images, runs one profiling or
//! detection routine and prints the result as JSON on stdout. Logs go to
//! stderr.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "imtool")]
#[command(about = "Radial/azimuthal profiles and peak detection for radio images")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Analysis configuration file (YAML)
    #[arg(short, long, env = "IMTOOL_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mean intensity in annuli around the reference pixel
    Radial {
        /// Image JSON dump
        image: PathBuf,
    },

    /// Mean intensity along a ring of fixed radius
    Azimuthal {
        /// Image JSON dump
        image: PathBuf,

        /// Ring radius in arcsec (overrides the config)
        #[arg(short, long)]
        radius: Option<f64>,
    },

    /// Local maxima, optionally restricted by a mask
    Peaks {
        /// Image JSON dump
        image: PathBuf,

        /// Mask image; only pixels with mask > 0 can be peaks
        #[arg(short, long)]
        mask: Option<PathBuf>,

        /// Square neighborhood size (overrides the config)
        #[arg(long)]
        cell: Option<usize>,
    },

    /// RMS inside a region mask
    Stats {
        /// Image JSON dump
        image: PathBuf,

        /// Region mask image
        #[arg(short, long)]
        mask: PathBuf,

        /// Measure outside the region instead
        #[arg(long)]
        invert: bool,
    },

    /// Pixel-wise difference of two images
    Diff {
        /// Image JSON dump
        image: PathBuf,

        /// Image subtracted from the first
        other: PathBuf,
    },

    /// Axis ticks, titles and beam overlay geometry
    Ticks {
        /// Image JSON dump
        image: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = config::load_config(args.config.as_deref())?;
    info!(config = ?args.config, "Loaded analysis configuration");

    let output = match args.command {
        Commands::Radial { image } => commands::radial(&image, &config)?,
        Commands::Azimuthal { image, radius } => {
            if let Some(radius) = radius {
                config.azimuthal.radius_arcsec = radius;
                config.azimuthal.validate().map_err(anyhow::Error::msg)?;
            }
            commands::azimuthal(&image, &config)?
        }
        Commands::Peaks { image, mask, cell } => {
            if let Some(cell) = cell {
                config.peaks.cell = cell;
                config.peaks.validate().map_err(anyhow::Error::msg)?;
            }
            commands::peaks(&image, mask.as_deref(), &config)?
        }
        Commands::Stats {
            image,
            mask,
            invert,
        } => commands::stats(&image, &mask, invert, &config)?,
        Commands::Diff { image, other } => commands::diff(&image, &other, &config)?,
        Commands::Ticks { image } => commands::ticks(&image, &config)?,
    };

    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", serde_json::to_string(&output)?);
    }

    Ok(())
}
