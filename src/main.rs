use anyhow::{Context, Result};
use clap::Parser;
use std::convert::TryFrom;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use gpstime::{args, GpsTime};

/// Convert a UTC time to a GPS week number and time of week
#[derive(Parser)]
#[command(name = "gpstime", version, about)]
#[command(after_help = "\
TIME is Unix time in milliseconds, or a UTC date and time of day
as YYYY-MM-DD HH:MM:SS with an optional +HH:MM offset.
Without TIME the system clock is used.")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Unix milliseconds, or a date and a time of day
    #[arg(value_name = "TIME", num_args = 0..=2, allow_negative_numbers = true)]
    time: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!(args = ?cli.time, "gpstime started");
    let utc = args::instant(&cli.time)
        .context("cannot work out which time to convert")?;
    let gps = GpsTime::try_from(utc)
        .with_context(|| format!("cannot convert {} to GPS time", utc))?;

    println!("UTC DATETIME: {}", utc);
    println!("{}", gps);
    Ok(())
}
