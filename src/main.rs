// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Ride Totals CLI
//!
//! Prints the distance total of every reporting window:
//!
//! ```text
//! Zwischenstand zum 02.06.2023: 1000.00m
//! Gesamtergebnis: 3000.00m
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::info;

use ride_totals::aggregator::{AggregationObserver, NoopObserver, TracingObserver};
use ride_totals::config::Config;
use ride_totals::logging;
use ride_totals::models::Report;
use ride_totals::pipeline::{self, RunOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "ride-totals")]
#[command(author, version, about = "Distance totals from a fitness-data export", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Directory containing the export archive
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Archive file name inside the base directory
    #[arg(long)]
    archive: Option<String>,

    /// Activity type token matched against file names
    #[arg(short, long)]
    pattern: Option<String>,

    /// Read workout files from an already extracted directory
    #[arg(long, conflicts_with = "keep_temp")]
    workouts_dir: Option<PathBuf>,

    /// Keep the extracted files after the run
    #[arg(long, default_value = "false")]
    keep_temp: bool,

    /// Output format of the report
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log the distance of every workout file
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Wait for Enter before exiting
    #[arg(long, default_value = "false")]
    pause: bool,
}

impl Args {
    fn apply_to(&self, config: &mut Config) {
        if let Some(base_dir) = &self.base_dir {
            config.base_dir = Some(base_dir.clone());
        }
        if let Some(archive) = &self.archive {
            config.archive_name = archive.clone();
        }
        if let Some(pattern) = &self.pattern {
            config.activity_pattern = pattern.clone();
        }
    }
}

fn print_report(report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

fn wait_for_enter() -> Result<()> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env(args.verbose)?;

    let mut config = Config::load(args.config.clone())?;
    args.apply_to(&mut config);
    info!(pattern = %config.activity_pattern, windows = config.windows.len(), "Configuration loaded");

    let observer: &dyn AggregationObserver = if args.verbose {
        &TracingObserver
    } else {
        &NoopObserver
    };

    let report = match &args.workouts_dir {
        Some(dir) => pipeline::summarize_directory(dir, &config, observer),
        None => pipeline::run(
            &config,
            observer,
            RunOptions {
                keep_workspace: args.keep_temp,
            },
        ),
    }
    .context("Failed to compute distance totals")?;

    print_report(&report, args.format)?;

    if args.pause {
        wait_for_enter()?;
    }

    Ok(())
}
