// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Workout file selection by activity type and date window

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::{ExportError, Result};
use crate::models::{ActivityFile, DateRange};

/// List the workout files of `directory` matching `name_pattern` inside `range`
///
/// Only regular files are considered, in directory enumeration order. Every
/// file must carry a date prefix; a single malformed name fails the scan.
pub fn select(directory: &Path, name_pattern: &str, range: &DateRange) -> Result<Vec<String>> {
    if name_pattern.is_empty() {
        return Err(ExportError::InvalidConfig(
            "activity pattern must not be empty".to_string(),
        ));
    }

    let read_error = |source| ExportError::DirectoryRead {
        path: directory.to_path_buf(),
        source,
    };

    let mut selected = Vec::new();
    for entry in fs::read_dir(directory).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        if !entry.file_type().map_err(read_error)?.is_file() {
            continue;
        }

        let file_name = entry.file_name().into_string().map_err(|raw| {
            ExportError::InvalidDatePrefix {
                file_name: raw.to_string_lossy().into_owned(),
                reason: "name is not valid UTF-8".to_string(),
            }
        })?;

        let file = ActivityFile::from_file_name(&file_name)?;
        if file.matches_pattern(name_pattern) && range.contains(file.instant()) {
            debug!(file = %file.file_name, date = %file.date, "Selected workout file");
            selected.push(file.file_name);
        }
    }

    Ok(selected)
}
