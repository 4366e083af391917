// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Export Pipeline
//!
//! Entry point composing extraction, selection and aggregation:
//!
//! ```text
//! archive ──extract──▶ workspace ──select(window)──▶ files ──lookup──▶ sum
//!                          ▲                                         │
//!                          └────────── once per reporting window ────┘
//! ```
//!
//! The archive is extracted once per run; every window is then computed over
//! the same workspace. The extracted files are removed when the run ends,
//! whether it succeeded or not.

use std::path::Path;

use tracing::info_span;

use crate::aggregator::{AggregationObserver, Aggregator, DirectoryLookup};
use crate::archive::{extract_workouts, TempWorkspace};
use crate::config::Config;
use crate::errors::{ExportError, Result};
use crate::models::Report;

/// Options of a single run that are not part of the configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Leave the extracted files on disk after the run
    pub keep_workspace: bool,
}

/// Extract the export archive and compute every configured window
pub fn run(config: &Config, observer: &dyn AggregationObserver, options: RunOptions) -> Result<Report> {
    let _span = info_span!("export_run", pattern = %config.activity_pattern).entered();

    config.validate()?;
    let archive_path = config.archive_path()?;
    if !archive_path.is_file() {
        return Err(ExportError::ArchiveMissing(archive_path));
    }

    let mut workspace = TempWorkspace::create(config.workspace_path()?, &config.workout_extension)?;
    if options.keep_workspace {
        workspace.keep();
    }

    extract_workouts(&archive_path, workspace.path(), &config.workout_extension)?;
    let report = summarize_directory(workspace.path(), config, observer)?;

    workspace.close()?;
    Ok(report)
}

/// Compute every configured window over an already extracted directory
pub fn summarize_directory(
    directory: &Path,
    config: &Config,
    observer: &dyn AggregationObserver,
) -> Result<Report> {
    config.validate()?;

    let aggregator = Aggregator::new(DirectoryLookup::new(directory), observer);
    let results = aggregator.aggregate_windows(directory, &config.activity_pattern, &config.windows)?;

    Ok(Report {
        activity_pattern: config.activity_pattern.clone(),
        results,
    })
}
