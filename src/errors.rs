// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types for the export pipeline
//!
//! Every variant is fatal for a run. Callers propagate with `?` and the binary
//! decides to abort.

use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The home directory needed for the default base directory is unknown
    #[error("Home directory could not be resolved")]
    HomeDirUnavailable,

    #[error("Export archive not found: {}", .0.display())]
    ArchiveMissing(PathBuf),

    #[error("Failed to read export archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Failed to extract '{entry}' to {}: {source}", path.display())]
    ExtractWrite {
        entry: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Creating or removing the temporary extraction directory failed
    #[error("Workspace error at {}: {source}", path.display())]
    Workspace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read directory {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file name does not start with a `YYYY-MM-DD` date
    #[error("Invalid date prefix in file name '{file_name}': {reason}")]
    InvalidDatePrefix { file_name: String, reason: String },

    #[error("Failed to read workout file {}: {source}", path.display())]
    WorkoutRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed workout file '{file_name}': {source}")]
    MalformedWorkout {
        file_name: String,
        #[source]
        source: quick_xml::de::DeError,
    },

    /// No trackpoint in the file carries a distance
    #[error("Workout file '{0}' contains no distance samples")]
    EmptyWorkout(String),

    /// NaN, infinite or negative distance
    #[error("Workout file '{file_name}' contains an invalid distance sample: {value}")]
    InvalidSample { file_name: String, value: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
