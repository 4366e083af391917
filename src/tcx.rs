// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # TCX Workout Parser
//!
//! Decodes the parts of a Training Center XML document needed to compute a
//! distance: `Activities > Activity > Lap > Track > Trackpoint > DistanceMeters`.
//! Every other element is ignored.

use serde::Deserialize;
use tracing::debug;

use crate::models::DistanceSample;

/// Root element of a TCX document
#[derive(Debug, Deserialize)]
pub struct TrainingCenterDatabase {
    #[serde(rename = "Activities")]
    pub activities: Activities,
}

#[derive(Debug, Default, Deserialize)]
pub struct Activities {
    #[serde(rename = "Activity", default)]
    pub activity: Vec<Activity>,
}

#[derive(Debug, Deserialize)]
pub struct Activity {
    /// `Biking`, `Running` or `Other`
    #[serde(rename = "@Sport", default)]
    pub sport: Option<String>,
    #[serde(rename = "Lap", default)]
    pub laps: Vec<Lap>,
}

#[derive(Debug, Deserialize)]
pub struct Lap {
    #[serde(rename = "Track", default)]
    pub tracks: Vec<Track>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Track {
    #[serde(rename = "Trackpoint", default)]
    pub trackpoints: Vec<Trackpoint>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Trackpoint {
    #[serde(rename = "DistanceMeters", default)]
    pub distance_meters: Option<DistanceSample>,
}

impl TrainingCenterDatabase {
    /// Decode a complete TCX document
    pub fn from_bytes(contents: &[u8]) -> Result<Self, quick_xml::de::DeError> {
        quick_xml::de::from_reader(contents)
    }

    /// Distance of every trackpoint that carries one, in document order
    pub fn distance_samples(&self) -> Vec<DistanceSample> {
        self.activities
            .activity
            .iter()
            .flat_map(|activity| activity.laps.iter())
            .flat_map(|lap| lap.tracks.iter())
            .flat_map(|track| track.trackpoints.iter())
            .filter_map(|trackpoint| trackpoint.distance_meters)
            .collect()
    }

    /// Sport attribute of each activity, for diagnostics
    pub fn sports(&self) -> Vec<&str> {
        self.activities
            .activity
            .iter()
            .filter_map(|activity| activity.sport.as_deref())
            .collect()
    }
}

/// Decode a TCX document into its flattened distance samples
///
/// Trackpoints without `DistanceMeters` are skipped rather than read as zero.
pub fn parse_distance_samples(contents: &[u8]) -> Result<Vec<DistanceSample>, quick_xml::de::DeError> {
    let workout = TrainingCenterDatabase::from_bytes(contents)?;
    let samples = workout.distance_samples();
    debug!(sports = ?workout.sports(), samples = samples.len(), "Parsed workout");
    Ok(samples)
}
