// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Constants Module
//!
//! Default values for the export layout and the workout file format, plus the
//! names of the environment variables that override them.

/// Defaults used when no configuration file is present
pub mod defaults {
    /// Name of the export archive inside the base directory
    pub const ARCHIVE_NAME: &str = "GoogleFitExport.zip";

    /// Name of the temporary extraction directory inside the base directory
    pub const TEMP_DIR_NAME: &str = "google-fit-tmp";

    /// Activity-type token searched for in workout file names
    pub const ACTIVITY_PATTERN: &str = "Radfahren";

    /// Extension of workout files inside the archive
    pub const WORKOUT_EXTENSION: &str = ".tcx";

    /// Directory below the home directory holding the archive
    pub const DOWNLOADS_DIR: &str = "Downloads";

    /// Directory below the user config dir holding `config.toml`
    pub const CONFIG_DIR_NAME: &str = "ride-totals";

    /// Service name reported in structured logs
    pub const SERVICE_NAME: &str = "ride-totals";
}

/// Workout file naming conventions
pub mod workout_files {
    /// Workout files start with a `YYYY-MM-DD` date
    pub const DATE_PREFIX_LEN: usize = 10;

    /// chrono format of the date prefix
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Environment variables overriding configuration values
pub mod env_keys {
    pub const BASE_DIR: &str = "RIDE_TOTALS_BASE_DIR";
    pub const ARCHIVE: &str = "RIDE_TOTALS_ARCHIVE";
    pub const TEMP_DIR: &str = "RIDE_TOTALS_TEMP_DIR";
    pub const PATTERN: &str = "RIDE_TOTALS_PATTERN";
    pub const EXTENSION: &str = "RIDE_TOTALS_EXTENSION";
}
