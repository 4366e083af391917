// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Environment variable overrides for the export configuration

use std::env;
use std::path::PathBuf;
use tracing::debug;

use super::Config;
use crate::constants::env_keys;

/// Apply `RIDE_TOTALS_*` variables from the process environment
pub fn apply_env_overrides(config: &mut Config) {
    apply_overrides_from(config, |key| env::var(key).ok());
}

/// Apply overrides from any key lookup; empty values are ignored
pub fn apply_overrides_from<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| {
        let value = lookup(key).filter(|value| !value.is_empty())?;
        debug!(key = %key, value = %value, "Configuration override from environment");
        Some(value)
    };

    if let Some(base_dir) = var(env_keys::BASE_DIR) {
        config.base_dir = Some(PathBuf::from(base_dir));
    }
    if let Some(archive) = var(env_keys::ARCHIVE) {
        config.archive_name = archive;
    }
    if let Some(temp_dir) = var(env_keys::TEMP_DIR) {
        config.temp_dir_name = temp_dir;
    }
    if let Some(pattern) = var(env_keys::PATTERN) {
        config.activity_pattern = pattern;
    }
    if let Some(extension) = var(env_keys::EXTENSION) {
        config.workout_extension = extension;
    }
}
