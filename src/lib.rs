// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Ride Totals
//!
//! Distance totals for cycling activities from a local fitness-data export.
//!
//! The export is a zip archive with one TCX file per recorded workout, named
//! with a leading date and an activity-type token, e.g.
//! `2023-05-01T07_12_40.123+02_00_PT1H2M_Radfahren.tcx`. A run extracts the
//! archive, selects the files of one activity type inside each reporting
//! window, takes the largest cumulative distance of every file and sums them.
//!
//! ## Architecture
//!
//! - **Archive**: Extraction into a self-removing temporary workspace
//! - **Selector**: File filtering by name pattern and date window
//! - **TCX**: Workout file decoding into distance samples
//! - **Distance**: Per-file total distance
//! - **Aggregator**: Window totals with pluggable lookup and diagnostics
//! - **Pipeline**: The run entry point
//! - **Config**: File, environment and default configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ride_totals::aggregator::TracingObserver;
//! use ride_totals::config::Config;
//! use ride_totals::pipeline::{self, RunOptions};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load(None)?;
//!     let report = pipeline::run(&config, &TracingObserver, RunOptions::default())?;
//!     print!("{}", report);
//!     Ok(())
//! }
//! ```

/// Distance aggregation across reporting windows
pub mod aggregator;

/// Export archive extraction and temporary workspace
pub mod archive;

/// Configuration management and persistence
pub mod config;

/// Application constants and default values
pub mod constants;

/// Per-file distance extraction
pub mod distance;

/// Error types
pub mod errors;

/// Structured logging setup and events
pub mod logging;

/// Common data models
pub mod models;

/// Run entry point
pub mod pipeline;

/// Workout file selection
pub mod selector;

/// TCX workout file decoding
pub mod tcx;
