//! Core data model: per-record samples, per-activity aggregates and the
//! activity list driven by import, sorting and playback.
//!
//! Unit conventions (kept from the FIT source material):
//! - durations in milliseconds
//! - distances in centimeters
//! - speeds in millimeters/second
//! - temperatures in °C, altitudes/ascents in meters
//! - heart rate in bpm, GPS accuracy in meters

use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::asyncdata::AsyncData;
use crate::error::ActivityError;
use crate::stats::ChannelStats;

/// Fallback used when an activity cannot provide a meaningful
/// records-per-second rate (no records, or no/zero total duration).
pub const FALLBACK_RPS: f64 = 1.0;

/// One timestamped sample from the record stream.
///
/// Every non-time field is present iff the source sensor reported a valid
/// value for this sample. A record with nothing but a timestamp is valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordData {
    pub time: DateTime<Local>,
    /// Distance in centimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    /// Speed in mm/s
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Temperature in °C
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<i8>,
    /// Altitude in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// GPS accuracy in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps_accuracy: Option<u8>,
    /// Heart rate in bpm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u8>,
}

impl RecordData {
    /// A record carrying only its timestamp.
    pub fn at(time: DateTime<Local>) -> Self {
        Self {
            time,
            distance: None,
            speed: None,
            temperature: None,
            altitude: None,
            gps_accuracy: None,
            heart_rate: None,
        }
    }
}

/// Total / active / pause durations in milliseconds.
///
/// `pause` is derived as `total - active` and only present when both
/// operands are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause: Option<u32>,
}

/// Aggregates over one decoded FIT file.
///
/// Constructed once by [`crate::aggregate::aggregate`] and immutable
/// thereafter. `records` keeps the chronological source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityData {
    pub duration: DurationStats,
    /// Total distance in centimeters, summed across sessions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<u32>,
    /// Speed in mm/s
    pub speed: ChannelStats<f64>,
    /// Temperature in °C
    pub temperature: ChannelStats<i8>,
    /// Altitude in meters
    pub altitude: ChannelStats<f64>,
    /// GPS accuracy in meters
    pub gps_accuracy: ChannelStats<u8>,
    /// Heart rate in bpm
    pub heart_rate: ChannelStats<u8>,
    /// Total ascent in meters, summed across sessions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascent: Option<u16>,
    /// Total descent in meters, summed across sessions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descent: Option<u16>,
    pub session_count: u32,
    pub records: Vec<RecordData>,
}

impl ActivityData {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Timestamp of the first record, if any.
    pub fn start_time(&self) -> Option<DateTime<Local>> {
        self.records.first().map(|record| record.time)
    }

    /// Timestamp of the last record, if any.
    pub fn finish_time(&self) -> Option<DateTime<Local>> {
        self.records.last().map(|record| record.time)
    }

    /// Records per second: maps wall-clock time to a record-index delta
    /// during playback. Falls back to [`FALLBACK_RPS`] for degenerate
    /// activities (no records, or zero/absent total duration).
    pub fn rps(&self) -> f64 {
        let total_ms = match self.duration.total {
            Some(ms) if ms > 0 => f64::from(ms),
            _ => return FALLBACK_RPS,
        };
        if self.records.is_empty() {
            return FALLBACK_RPS;
        }
        self.records.len() as f64 / (total_ms / 1000.0)
    }
}

/// One imported file: its path, parse lifecycle and playback cursor.
#[derive(Debug, Clone)]
pub struct Activity {
    pub path: PathBuf,
    pub data: AsyncData<ActivityError, ActivityData>,
    /// Index of the currently selected record; owned by playback/navigation
    /// and only meaningful while `data` is `Success`.
    record_index: usize,
}

impl Activity {
    /// A freshly discovered activity that nobody asked to parse yet.
    pub fn not_asked(path: PathBuf) -> Self {
        Self {
            path,
            data: AsyncData::NotAsked,
            record_index: 0,
        }
    }

    pub fn record_index(&self) -> usize {
        self.record_index
    }

    /// Move the selected record by `delta`, clamped to the valid range.
    /// Returns false (and does nothing) unless the parse succeeded.
    pub fn advance_record(&mut self, delta: i64) -> bool {
        let Some(data) = self.data.success() else {
            return false;
        };
        if data.records.is_empty() {
            self.record_index = 0;
            return true;
        }
        let max = data.records.len() as i64 - 1;
        let index = (self.record_index as i64 + delta).clamp(0, max);
        self.record_index = index as usize;
        true
    }

    /// Jump back to the first record. Idempotent.
    pub fn reset_record_index(&mut self) {
        self.record_index = 0;
    }

    /// Start time of a successfully parsed activity.
    pub fn start_time(&self) -> Option<DateTime<Local>> {
        self.data.success().and_then(ActivityData::start_time)
    }

    /// Total distance in centimeters; zero until parsed.
    pub fn total_distance(&self) -> u32 {
        self.data
            .success()
            .and_then(|data| data.total_distance)
            .unwrap_or(0)
    }

    /// Records-per-second rate, [`FALLBACK_RPS`] until parsed.
    pub fn rps(&self) -> f64 {
        self.data.success().map_or(FALLBACK_RPS, ActivityData::rps)
    }
}

/// The ordered activity collection, mutated in place by the importer and
/// reordered by the sort engine.
pub type Activities = Vec<Activity>;
