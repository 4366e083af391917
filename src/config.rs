// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration management for export runs
//!
//! Values come from a TOML file, then environment overrides, then CLI flags.

pub mod environment;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::constants::defaults;
use crate::errors::ExportError;
use crate::models::{DateRange, ReportWindow};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the archive; `$HOME/Downloads` when unset
    pub base_dir: Option<PathBuf>,
    pub archive_name: String,
    pub temp_dir_name: String,
    /// Substring identifying the activity type in file names
    pub activity_pattern: String,
    pub workout_extension: String,
    pub windows: Vec<ReportWindow>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: None,
            archive_name: defaults::ARCHIVE_NAME.to_string(),
            temp_dir_name: defaults::TEMP_DIR_NAME.to_string(),
            activity_pattern: defaults::ACTIVITY_PATTERN.to_string(),
            workout_extension: defaults::WORKOUT_EXTENSION.to_string(),
            windows: default_windows(),
        }
    }
}

/// Only called with literal calendar dates
fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("default window bounds are valid dates")
        .and_utc()
}

/// Season checkpoint on 2 June and the season total
fn default_windows() -> Vec<ReportWindow> {
    let season_start = utc(2023, 4, 1, 0, 0);
    vec![
        ReportWindow::new(
            "Zwischenstand zum 02.06.2023",
            DateRange::new(season_start, utc(2023, 6, 2, 23, 59)),
        ),
        ReportWindow::new(
            "Gesamtergebnis",
            DateRange::new(season_start, utc(2023, 10, 31, 0, 0)),
        ),
    ]
}

/// True when `name` is exactly one normal path component, such as `google-fit-tmp`
fn is_single_folder_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

impl Config {
    /// Load configuration from `path`, the user config file, or defaults,
    /// then apply environment overrides
    pub fn load(path: Option<String>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(&path)?,
            None => match Self::default_config_path() {
                Some(default_path) if default_path.exists() => Self::load_from_file(&default_path)?,
                _ => Self::default(),
            },
        };

        dotenv::dotenv().ok();
        environment::apply_env_overrides(&mut config);

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save(&self, path: Option<String>) -> Result<()> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => Self::default_config_path().context("No user config directory available")?,
        };

        let parent = config_path.parent().context("Invalid config path")?;
        fs::create_dir_all(parent)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;

        Ok(())
    }

    /// `<config_dir>/ride-totals/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(defaults::CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Check the values a run depends on
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.activity_pattern.is_empty() {
            return Err(ExportError::InvalidConfig(
                "activity pattern must not be empty".to_string(),
            ));
        }
        if !is_single_folder_name(&self.temp_dir_name) {
            return Err(ExportError::InvalidConfig(format!(
                "temp directory name '{}' must be a single folder name inside the base directory",
                self.temp_dir_name
            )));
        }
        let extension_body = self.workout_extension.strip_prefix('.').unwrap_or_default();
        if extension_body.is_empty() || extension_body.contains(['/', '\\']) {
            return Err(ExportError::InvalidConfig(format!(
                "workout extension '{}' must look like '.tcx'",
                self.workout_extension
            )));
        }
        if self.windows.is_empty() {
            return Err(ExportError::InvalidConfig(
                "at least one reporting window is required".to_string(),
            ));
        }
        if let Some(window) = self.windows.iter().find(|w| !w.range().is_valid()) {
            return Err(ExportError::InvalidConfig(format!(
                "window '{}' must start before it ends",
                window.label
            )));
        }
        Ok(())
    }

    pub fn resolve_base_dir(&self) -> Result<PathBuf, ExportError> {
        match &self.base_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::home_dir()
                .map(|home| home.join(defaults::DOWNLOADS_DIR))
                .ok_or(ExportError::HomeDirUnavailable),
        }
    }

    pub fn archive_path(&self) -> Result<PathBuf, ExportError> {
        Ok(self.resolve_base_dir()?.join(&self.archive_name))
    }

    pub fn workspace_path(&self) -> Result<PathBuf, ExportError> {
        Ok(self.resolve_base_dir()?.join(&self.temp_dir_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_temp_config_file(content: &str) -> (TempDir, String) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, content).expect("Failed to write temp config");
        (temp_dir, config_path.to_string_lossy().to_string())
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.archive_name, "GoogleFitExport.zip");
        assert_eq!(config.temp_dir_name, "google-fit-tmp");
        assert_eq!(config.activity_pattern, "Radfahren");
        assert_eq!(config.workout_extension, ".tcx");
        assert_eq!(config.windows.len(), 2);
        assert_eq!(config.windows[1].label, "Gesamtergebnis");
        assert_eq!(config.windows[0].end, utc(2023, 6, 2, 23, 59));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_from_file() {
        let config_content = r#"
base_dir = "/data/exports"
activity_pattern = "Laufen"

[[windows]]
label = "Spring"
start = "2024-03-01T00:00:00Z"
end = "2024-06-01T00:00:00Z"
"#;
        let (_temp_dir, path) = create_temp_config_file(config_content);
        let config = Config::load_from_file(&path).expect("Failed to load config");

        assert_eq!(config.base_dir, Some(PathBuf::from("/data/exports")));
        assert_eq!(config.activity_pattern, "Laufen");
        // Unset keys keep their defaults
        assert_eq!(config.archive_name, "GoogleFitExport.zip");
        assert_eq!(config.windows.len(), 1);
        assert_eq!(config.windows[0].start, utc(2024, 3, 1, 0, 0));
        assert_eq!(
            config.archive_path().unwrap(),
            PathBuf::from("/data/exports/GoogleFitExport.zip")
        );
        assert_eq!(
            config.workspace_path().unwrap(),
            PathBuf::from("/data/exports/google-fit-tmp")
        );
    }

    #[test]
    fn test_config_save_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            base_dir: Some(PathBuf::from("/tmp/exports")),
            ..Config::default()
        };
        config
            .save(Some(path.to_string_lossy().to_string()))
            .expect("Failed to save config");

        let loaded = Config::load_from_file(&path).expect("Failed to load saved config");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let (_temp_dir, path) = create_temp_config_file("this is not valid toml [[[");
        let result = Config::load_from_file(&path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_missing_explicit_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("absent.toml");
        let result = Config::load(Some(path.to_string_lossy().to_string()));
        assert!(result.unwrap_err().to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config {
            activity_pattern: String::new(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ExportError::InvalidConfig(_))));

        let config = Config {
            windows: Vec::new(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ExportError::InvalidConfig(_))));

        let start = utc(2023, 6, 1, 0, 0);
        let config = Config {
            windows: vec![ReportWindow::new("Backwards", DateRange::new(start, start))],
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Backwards"));
    }

    #[test]
    fn test_validate_rejects_temp_dir_outside_base_dir() {
        let absolute = std::env::temp_dir().to_string_lossy().to_string();
        for name in ["", ".", "..", "../elsewhere", "nested/tmp", absolute.as_str()] {
            let config = Config {
                temp_dir_name: name.to_string(),
                ..Config::default()
            };
            let err = config.validate().unwrap_err();
            assert!(
                err.to_string().contains("temp directory name"),
                "'{name}' should be rejected"
            );
        }

        let config = Config {
            temp_dir_name: "rides-tmp".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_catch_all_extension() {
        for extension in ["", ".", "tcx", "./x"] {
            let config = Config {
                workout_extension: extension.to_string(),
                ..Config::default()
            };
            assert!(
                matches!(config.validate(), Err(ExportError::InvalidConfig(_))),
                "'{extension}' should be rejected"
            );
        }
    }

    #[test]
    fn test_default_window_bounds() {
        let windows = default_windows();
        assert_eq!(windows[0].start.to_rfc3339(), "2023-04-01T00:00:00+00:00");
        assert_eq!(windows[0].end.to_rfc3339(), "2023-06-02T23:59:00+00:00");
        assert_eq!(windows[1].end.to_rfc3339(), "2023-10-31T00:00:00+00:00");
    }
}
