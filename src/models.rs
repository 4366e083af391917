// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Data Models
//!
//! Core data structures shared by the selector, the aggregator and the report
//! output.
//!
//! ## Core Models
//!
//! - [`ActivityFile`]: A workout file name with its embedded date
//! - [`DateRange`]: Exclusive UTC interval used to select files
//! - [`ReportWindow`]: A labelled date range
//! - [`AggregateResult`]: The distance total of one window
//! - [`Report`]: All window totals of one run

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::workout_files::{DATE_FORMAT, DATE_PREFIX_LEN};
use crate::errors::{ExportError, Result};

/// Distance travelled so far, in meters
pub type DistanceSample = f64;

/// A workout file found in the extraction directory
///
/// File names start with the activity date, e.g.
/// `2023-05-01T07_12_40.123+02_00_PT1H2M_Radfahren.tcx`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityFile {
    pub file_name: String,
    pub date: NaiveDate,
}

impl ActivityFile {
    /// Parse the leading `YYYY-MM-DD` date of a file name
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let prefix = file_name
            .get(..DATE_PREFIX_LEN)
            .ok_or_else(|| ExportError::InvalidDatePrefix {
                file_name: file_name.to_string(),
                reason: format!("name is shorter than {} characters", DATE_PREFIX_LEN),
            })?;

        let date = NaiveDate::parse_from_str(prefix, DATE_FORMAT).map_err(|e| {
            ExportError::InvalidDatePrefix {
                file_name: file_name.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            file_name: file_name.to_string(),
            date,
        })
    }

    /// Activity type check: the pattern may appear anywhere in the name
    pub fn matches_pattern(&self, pattern: &str) -> bool {
        self.file_name.contains(pattern)
    }

    /// Midnight UTC of the activity date
    pub fn instant(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.date.and_time(NaiveTime::default()))
    }
}

/// Time interval excluding both of its bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Range between the midnights of two calendar days
    pub fn between_days(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Utc.from_utc_datetime(&start.and_time(NaiveTime::default())),
            end: Utc.from_utc_datetime(&end.and_time(NaiveTime::default())),
        }
    }

    /// Strict on both sides: an instant equal to a bound is outside
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start < instant && instant < self.end
    }

    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}

/// A labelled reporting window
///
/// Bounds are RFC 3339 strings in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    pub fn new(label: impl Into<String>, range: DateRange) -> Self {
        Self {
            label: label.into(),
            start: range.start,
            end: range.end,
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }
}

/// Distance total of all selected files in one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub label: String,
    pub range: DateRange,
    pub total_meters: f64,
    pub file_count: usize,
}

impl AggregateResult {
    /// Total in meters with two decimals, e.g. `3000.00`
    pub fn formatted_total(&self) -> String {
        format!("{:.2}", self.total_meters)
    }
}

impl fmt::Display for AggregateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}m", self.label, self.formatted_total())
    }
}

/// Totals for every configured window, in configuration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub activity_pattern: String,
    pub results: Vec<AggregateResult>,
}

impl Report {
    pub fn total_for(&self, label: &str) -> Option<f64> {
        self.results
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.total_meters)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            writeln!(f, "{}", result)?;
        }
        Ok(())
    }
}
