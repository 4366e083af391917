// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Distance Aggregation
//!
//! Sums per-file distances over the files selected for each reporting window.
//!
//! - [`DistanceLookup`] resolves a file name to its distance. The default
//!   [`DirectoryLookup`] reads, parses and reduces the file on demand.
//! - [`AggregationObserver`] receives per-file and per-window diagnostics;
//!   [`TracingObserver`] forwards them to the structured logger.
//! - [`Aggregator`] runs the selector and the lookup for one or many windows.
//!
//! The first failing file aborts the whole aggregation; no partial totals are
//! returned.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug_span;

use crate::distance::workout_distance;
use crate::errors::{ExportError, Result};
use crate::logging::AppLogger;
use crate::models::{AggregateResult, DistanceSample, ReportWindow};
use crate::selector;
use crate::tcx::parse_distance_samples;

/// Resolves a workout file name to its total distance
pub trait DistanceLookup {
    fn distance_for(&self, file_name: &str) -> Result<DistanceSample>;
}

/// Reads workout files from a directory
#[derive(Debug, Clone)]
pub struct DirectoryLookup {
    directory: PathBuf,
}

impl DirectoryLookup {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl DistanceLookup for DirectoryLookup {
    fn distance_for(&self, file_name: &str) -> Result<DistanceSample> {
        let _span = debug_span!("workout", file = %file_name).entered();
        let path = self.directory.join(file_name);
        let contents = fs::read(&path).map_err(|source| ExportError::WorkoutRead { path, source })?;

        let samples = parse_distance_samples(&contents).map_err(|source| ExportError::MalformedWorkout {
            file_name: file_name.to_string(),
            source,
        })?;

        workout_distance(file_name, &samples)
    }
}

/// Diagnostic side channel of the aggregation
pub trait AggregationObserver {
    fn on_file_distance(&self, _file_name: &str, _distance: DistanceSample) {}

    fn on_window_total(&self, _result: &AggregateResult) {}
}

/// Discards all diagnostics
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl AggregationObserver for NoopObserver {}

/// Emits diagnostics as `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl AggregationObserver for TracingObserver {
    fn on_file_distance(&self, file_name: &str, distance: DistanceSample) {
        AppLogger::log_workout_distance(file_name, distance);
    }

    fn on_window_total(&self, result: &AggregateResult) {
        AppLogger::log_window_total(result);
    }
}

/// Sums workout distances for reporting windows
pub struct Aggregator<'a, L: DistanceLookup> {
    lookup: L,
    observer: &'a dyn AggregationObserver,
}

impl<'a, L: DistanceLookup> Aggregator<'a, L> {
    pub fn new(lookup: L, observer: &'a dyn AggregationObserver) -> Self {
        Self { lookup, observer }
    }

    /// Sum of the distances of `file_names`
    pub fn aggregate<S: AsRef<str>>(&self, file_names: &[S]) -> Result<f64> {
        let mut total = 0.0;
        for file_name in file_names {
            let file_name = file_name.as_ref();
            let distance = self.lookup.distance_for(file_name)?;
            self.observer.on_file_distance(file_name, distance);
            total += distance;
        }
        Ok(total)
    }

    /// Select the files of one window in `directory` and sum them
    pub fn aggregate_window(
        &self,
        directory: &Path,
        name_pattern: &str,
        window: &ReportWindow,
    ) -> Result<AggregateResult> {
        let range = window.range();
        let file_names = selector::select(directory, name_pattern, &range)?;
        let total_meters = self.aggregate(&file_names)?;

        let result = AggregateResult {
            label: window.label.clone(),
            range,
            total_meters,
            file_count: file_names.len(),
        };
        self.observer.on_window_total(&result);

        Ok(result)
    }

    /// Independent totals for every window over the same directory
    pub fn aggregate_windows(
        &self,
        directory: &Path,
        name_pattern: &str,
        windows: &[ReportWindow],
    ) -> Result<Vec<AggregateResult>> {
        windows
            .iter()
            .map(|window| self.aggregate_window(directory, name_pattern, window))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct MapLookup(HashMap<&'static str, f64>);

    impl DistanceLookup for MapLookup {
        fn distance_for(&self, file_name: &str) -> Result<DistanceSample> {
            self.0
                .get(file_name)
                .copied()
                .ok_or_else(|| ExportError::EmptyWorkout(file_name.to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        files: RefCell<Vec<(String, f64)>>,
    }

    impl AggregationObserver for RecordingObserver {
        fn on_file_distance(&self, file_name: &str, distance: DistanceSample) {
            self.files.borrow_mut().push((file_name.to_string(), distance));
        }
    }

    fn lookup() -> MapLookup {
        MapLookup(HashMap::from([("a", 10.0), ("b", 20.0), ("c", 5.0)]))
    }

    #[test]
    fn test_sum_is_order_independent() {
        let aggregator = Aggregator::new(lookup(), &NoopObserver);
        assert_eq!(aggregator.aggregate(&["a", "b", "c"]).unwrap(), 35.0);
        assert_eq!(aggregator.aggregate(&["c", "a", "b"]).unwrap(), 35.0);
        assert_eq!(aggregator.aggregate(&["b", "c", "a"]).unwrap(), 35.0);
    }

    #[test]
    fn test_empty_file_set_sums_to_zero() {
        let aggregator = Aggregator::new(lookup(), &NoopObserver);
        let none: [&str; 0] = [];
        assert_eq!(aggregator.aggregate(&none).unwrap(), 0.0);
    }

    #[test]
    fn test_lookup_failure_aborts() {
        let observer = RecordingObserver::default();
        let aggregator = Aggregator::new(lookup(), &observer);

        let err = aggregator.aggregate(&["a", "missing", "b"]).unwrap_err();
        assert!(matches!(err, ExportError::EmptyWorkout(ref name) if name == "missing"));
        assert_eq!(observer.files.borrow().len(), 1);
    }

    #[test]
    fn test_observer_sees_every_file() {
        let observer = RecordingObserver::default();
        let aggregator = Aggregator::new(lookup(), &observer);
        aggregator.aggregate(&["a", "c"]).unwrap();

        assert_eq!(
            *observer.files.borrow(),
            vec![("a".to_string(), 10.0), ("c".to_string(), 5.0)]
        );
    }
}
