// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-file distance extraction
//!
//! TCX trackpoints record the cumulative distance so far, so the largest
//! sample of a file is its total distance.

use crate::errors::{ExportError, Result};
use crate::models::DistanceSample;

/// Largest sample, scanning from the first element
pub fn max_distance(samples: &[DistanceSample]) -> Option<DistanceSample> {
    let (first, rest) = samples.split_first()?;
    let mut max = *first;
    for &sample in rest {
        if sample > max {
            max = sample;
        }
    }
    Some(max)
}

/// Total distance of one workout file
///
/// An empty sample set and any NaN, infinite or negative sample are errors.
pub fn workout_distance(file_name: &str, samples: &[DistanceSample]) -> Result<DistanceSample> {
    if let Some(&value) = samples.iter().find(|s| !s.is_finite() || **s < 0.0) {
        return Err(ExportError::InvalidSample {
            file_name: file_name.to_string(),
            value,
        });
    }

    max_distance(samples).ok_or_else(|| ExportError::EmptyWorkout(file_name.to_string()))
}
