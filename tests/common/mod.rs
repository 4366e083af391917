// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Shared fixtures for integration tests

#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use ride_totals::config::Config;
use ride_totals::models::{DateRange, ReportWindow};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;

/// TCX document with one trackpoint per entry; `None` omits `DistanceMeters`
pub fn tcx_document(samples: &[Option<f64>]) -> String {
    let trackpoints: String = samples
        .iter()
        .enumerate()
        .map(|(i, sample)| match sample {
            Some(distance) => format!(
                "<Trackpoint><Time>2023-05-01T07:{:02}:00Z</Time><DistanceMeters>{}</DistanceMeters></Trackpoint>",
                i % 60,
                distance
            ),
            None => format!("<Trackpoint><Time>2023-05-01T07:{:02}:00Z</Time></Trackpoint>", i % 60),
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<TrainingCenterDatabase xmlns="http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2">
  <Activities>
    <Activity Sport="Biking">
      <Id>2023-05-01T07:00:00Z</Id>
      <Lap StartTime="2023-05-01T07:00:00Z">
        <Track>{}</Track>
      </Lap>
    </Activity>
  </Activities>
</TrainingCenterDatabase>"#,
        trackpoints
    )
}

/// Write a zip archive with the given `(entry name, contents)` pairs
pub fn write_archive(path: &Path, entries: &[(&str, String)]) -> Result<()> {
    let mut writer = zip::ZipWriter::new(File::create(path)?);
    for (name, contents) in entries {
        writer.start_file(*name, SimpleFileOptions::default())?;
        writer.write_all(contents.as_bytes())?;
    }
    writer.finish()?;
    Ok(())
}

/// The three-file export: two rides and one run
pub fn sample_export_entries() -> Vec<(&'static str, String)> {
    vec![
        (
            "Takeout/Fit/Aktivitäten/2023-05-01_Radfahren.tcx",
            tcx_document(&[Some(0.0), Some(400.0), Some(1000.0), Some(999.5)]),
        ),
        (
            "Takeout/Fit/Aktivitäten/2023-05-15_Laufen.tcx",
            tcx_document(&[Some(0.0), Some(500.0)]),
        ),
        (
            "Takeout/Fit/Aktivitäten/2023-06-10_Radfahren.tcx",
            tcx_document(&[Some(0.0), None, Some(2000.0)]),
        ),
        ("Takeout/Fit/Tägliche Aktivitätsmesswerte/summary.csv", "date,steps".to_string()),
    ]
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Checkpoint up to 2 June and the season total
pub fn sample_windows() -> Vec<ReportWindow> {
    vec![
        ReportWindow::new(
            "Zwischenstand",
            DateRange::between_days(day(2023, 4, 1), day(2023, 6, 2)),
        ),
        ReportWindow::new(
            "Gesamtergebnis",
            DateRange::between_days(day(2023, 4, 1), day(2023, 10, 31)),
        ),
    ]
}

pub fn config_for(base_dir: &Path) -> Config {
    Config {
        base_dir: Some(base_dir.to_path_buf()),
        windows: sample_windows(),
        ..Config::default()
    }
}
