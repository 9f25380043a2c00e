//! FIT decoder boundary.
//!
//! Wraps the `fitparser` crate: reads one file, picks out the session and
//! record messages and lifts their fields into typed structs. Fields the
//! device marked invalid are absent from the decoded message, so every
//! optional here means "no valid reading" — never zero.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Local};
use fitparser::profile::MesgNum;
use fitparser::{FitDataRecord, Value};
use log::debug;

use crate::aggregate::aggregate;
use crate::error::{ActivityError, Result};
use crate::model::ActivityData;

/// Per-session totals from a FIT `session` message.
///
/// Units are the decoder's: meters and seconds. Conversion into the model's
/// cm/ms conventions happens during aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionSummary {
    /// Total distance in meters
    pub total_distance: Option<f64>,
    /// Total ascent in meters
    pub total_ascent: Option<u16>,
    /// Total descent in meters
    pub total_descent: Option<u16>,
    /// Elapsed (wall-clock) time in seconds
    pub total_elapsed_time: Option<f64>,
    /// Timer (active) time in seconds
    pub total_timer_time: Option<f64>,
}

/// One FIT `record` message, decoder units (meters, m/s, °C, bpm).
///
/// Speed and altitude keep both the legacy and the "enhanced"
/// (higher-resolution) variants; the aggregator picks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordSample {
    pub time: DateTime<Local>,
    /// Distance in meters
    pub distance: Option<f64>,
    /// Speed in m/s
    pub speed: Option<f64>,
    /// Enhanced speed in m/s
    pub enhanced_speed: Option<f64>,
    /// Altitude in meters
    pub altitude: Option<f64>,
    /// Enhanced altitude in meters
    pub enhanced_altitude: Option<f64>,
    /// Temperature in °C
    pub temperature: Option<i8>,
    /// GPS accuracy in meters
    pub gps_accuracy: Option<u8>,
    /// Heart rate in bpm
    pub heart_rate: Option<u8>,
}

impl RecordSample {
    fn at(time: DateTime<Local>) -> Self {
        Self {
            time,
            distance: None,
            speed: None,
            enhanced_speed: None,
            altitude: None,
            enhanced_altitude: None,
            temperature: None,
            gps_accuracy: None,
            heart_rate: None,
        }
    }
}

/// Decode one FIT file into an [`ActivityData`] summary.
///
/// A file that decodes but carries no sessions or no records resolves as
/// [`ActivityError::NotAnActivity`] so callers can tell "no data" apart
/// from "data that happens to be zero".
pub fn parse_file(path: &Path) -> Result<ActivityData> {
    let mut file = File::open(path).map_err(|err| ActivityError::io(path, &err))?;
    let messages = fitparser::from_reader(&mut file)
        .map_err(|err| ActivityError::decode(path, err.to_string()))?;

    let (sessions, samples) = split_messages(&messages);
    debug!(
        "decoded '{}': {} sessions, {} records",
        path.display(),
        sessions.len(),
        samples.len()
    );

    if sessions.is_empty() || samples.is_empty() {
        return Err(ActivityError::not_an_activity(path));
    }

    Ok(aggregate(&sessions, &samples))
}

/// Partition decoded messages into session summaries and record samples,
/// keeping record order. Records without a timestamp are dropped.
fn split_messages(messages: &[FitDataRecord]) -> (Vec<SessionSummary>, Vec<RecordSample>) {
    let mut sessions = Vec::new();
    let mut samples = Vec::new();

    for message in messages {
        match message.kind() {
            MesgNum::Session => sessions.push(session_summary(message)),
            MesgNum::Record => {
                if let Some(sample) = record_sample(message) {
                    samples.push(sample);
                }
            }
            _ => {}
        }
    }

    (sessions, samples)
}

fn session_summary(message: &FitDataRecord) -> SessionSummary {
    let mut session = SessionSummary::default();
    for field in message.fields() {
        match field.name() {
            "total_distance" => session.total_distance = value_f64(field.value()),
            "total_ascent" => session.total_ascent = value_u16(field.value()),
            "total_descent" => session.total_descent = value_u16(field.value()),
            "total_elapsed_time" => session.total_elapsed_time = value_f64(field.value()),
            "total_timer_time" => session.total_timer_time = value_f64(field.value()),
            _ => {}
        }
    }
    session
}

fn record_sample(message: &FitDataRecord) -> Option<RecordSample> {
    let time = message.fields().iter().find_map(|field| {
        if field.name() == "timestamp" {
            value_time(field.value())
        } else {
            None
        }
    })?;

    let mut sample = RecordSample::at(time);
    for field in message.fields() {
        match field.name() {
            "distance" => sample.distance = value_f64(field.value()),
            "speed" => sample.speed = value_f64(field.value()),
            "enhanced_speed" => sample.enhanced_speed = value_f64(field.value()),
            "altitude" => sample.altitude = value_f64(field.value()),
            "enhanced_altitude" => sample.enhanced_altitude = value_f64(field.value()),
            "temperature" => sample.temperature = value_i8(field.value()),
            "gps_accuracy" => sample.gps_accuracy = value_u8(field.value()),
            "heart_rate" => sample.heart_rate = value_u8(field.value()),
            _ => {}
        }
    }
    Some(sample)
}

fn value_time(value: &Value) -> Option<DateTime<Local>> {
    match value {
        Value::Timestamp(ts) => Some(*ts),
        _ => None,
    }
}

fn value_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Float64(v) => Some(*v),
        Value::Float32(v) => Some(f64::from(*v)),
        Value::UInt8(v) => Some(f64::from(*v)),
        Value::UInt16(v) => Some(f64::from(*v)),
        Value::UInt32(v) => Some(f64::from(*v)),
        Value::SInt8(v) => Some(f64::from(*v)),
        Value::SInt16(v) => Some(f64::from(*v)),
        Value::SInt32(v) => Some(f64::from(*v)),
        _ => None,
    }
}

fn value_u16(value: &Value) -> Option<u16> {
    match value {
        Value::UInt16(v) => Some(*v),
        Value::UInt8(v) => Some(u16::from(*v)),
        Value::Float64(v) if *v >= 0.0 && *v <= f64::from(u16::MAX) => Some(*v as u16),
        _ => None,
    }
}

fn value_u8(value: &Value) -> Option<u8> {
    match value {
        Value::UInt8(v) => Some(*v),
        Value::Float64(v) if *v >= 0.0 && *v <= f64::from(u8::MAX) => Some(*v as u8),
        _ => None,
    }
}

fn value_i8(value: &Value) -> Option<i8> {
    match value {
        Value::SInt8(v) => Some(*v),
        Value::Float64(v) if *v >= f64::from(i8::MIN) && *v <= f64::from(i8::MAX) => {
            Some(*v as i8)
        }
        _ => None,
    }
}
