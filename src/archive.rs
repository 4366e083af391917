// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Export archive extraction and the temporary workspace it extracts into

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use zip::ZipArchive;

use crate::errors::{ExportError, Result};
use crate::logging::AppLogger;

/// Temporary extraction directory, emptied when dropped
///
/// Only files ending with the workout extension are ever deleted. The
/// directory itself is removed once nothing else is left in it, so files
/// that did not come from an export survive. Cleanup happens on every exit
/// path, including errors, unless the workspace was kept with
/// [`TempWorkspace::keep`].
#[derive(Debug)]
pub struct TempWorkspace {
    path: PathBuf,
    extension: String,
    remove_on_drop: bool,
}

impl TempWorkspace {
    /// Create the directory at `path`, clearing workout files of earlier runs
    pub fn create(path: impl Into<PathBuf>, extension: &str) -> Result<Self> {
        let path = path.into();
        let workspace_error = |source| ExportError::Workspace {
            path: path.clone(),
            source,
        };

        if path.is_dir() {
            let stale = remove_workout_files(&path, extension).map_err(workspace_error)?;
            if stale > 0 {
                warn!(path = %path.display(), stale, "Removed workout files left by an earlier run");
            }
        }
        fs::create_dir_all(&path).map_err(workspace_error)?;

        Ok(Self {
            path,
            extension: extension.to_string(),
            remove_on_drop: true,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Leave the directory on disk when the workspace is dropped
    pub fn keep(&mut self) {
        debug!(path = %self.path.display(), "Workspace will be kept");
        self.remove_on_drop = false;
    }

    /// Clean up now, reporting failures
    pub fn close(mut self) -> Result<()> {
        if !self.remove_on_drop {
            return Ok(());
        }
        self.remove_on_drop = false;

        let result = self.release();
        AppLogger::log_workspace_cleanup(&self.path, result.is_ok());
        result.map_err(|source| ExportError::Workspace {
            path: self.path.clone(),
            source,
        })
    }

    fn release(&self) -> io::Result<()> {
        remove_workout_files(&self.path, &self.extension)?;
        if fs::read_dir(&self.path)?.next().is_none() {
            fs::remove_dir(&self.path)?;
        } else {
            debug!(path = %self.path.display(), "Workspace holds other files, leaving directory in place");
        }
        Ok(())
    }
}

impl Drop for TempWorkspace {
    fn drop(&mut self) {
        if self.remove_on_drop {
            let result = self.release();
            AppLogger::log_workspace_cleanup(&self.path, result.is_ok());
        }
    }
}

/// Delete the regular files in `dir` whose name ends with `extension`
fn remove_workout_files(dir: &Path, extension: &str) -> io::Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let is_workout = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(extension));
        if is_workout && entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Base name of an archive entry, without its folders
fn entry_base_name(entry_name: &str) -> &str {
    entry_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(entry_name)
}

/// Write every archive entry ending with `extension` flat into `target_dir`
///
/// Returns the number of extracted files. Other entries and directories are
/// skipped.
pub fn extract_workouts(archive_path: &Path, target_dir: &Path, extension: &str) -> Result<usize> {
    if !archive_path.is_file() {
        return Err(ExportError::ArchiveMissing(archive_path.to_path_buf()));
    }

    let file = File::open(archive_path)
        .map_err(|_| ExportError::ArchiveMissing(archive_path.to_path_buf()))?;
    let mut archive = ZipArchive::new(file)?;

    let mut extracted = 0;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() || !entry.name().ends_with(extension) {
            continue;
        }

        let entry_name = entry.name().to_string();
        let base_name = entry_base_name(&entry_name);
        if base_name.is_empty() {
            continue;
        }

        let destination = target_dir.join(base_name);
        let write_error = |source| ExportError::ExtractWrite {
            entry: entry_name.clone(),
            path: destination.clone(),
            source,
        };

        let mut output = File::create(&destination).map_err(write_error)?;
        io::copy(&mut entry, &mut output).map_err(write_error)?;
        extracted += 1;
    }

    AppLogger::log_extraction(archive_path, target_dir, extracted);
    Ok(extracted)
}
