//! Single-pass statistics aggregation.
//!
//! Turns the decoder's session summaries and record samples into one
//! [`ActivityData`]: the per-record series (in source order) plus bounded
//! per-activity channel stats. Pure — one pass over records, one over
//! sessions, no external state.

use crate::decode::{RecordSample, SessionSummary};
use crate::model::{ActivityData, DurationStats, RecordData};
use crate::stats::StatAccumulator;

/// Aggregate decoded sessions and records into an activity summary.
///
/// Channel stats (speed, temperature, altitude, GPS accuracy, heart rate)
/// are computed across records; distance, ascent/descent and durations are
/// summed across sessions — multi-session files are common.
pub fn aggregate(sessions: &[SessionSummary], samples: &[RecordSample]) -> ActivityData {
    let mut speed = StatAccumulator::new();
    let mut temperature = StatAccumulator::new();
    let mut altitude = StatAccumulator::new();
    let mut gps_accuracy = StatAccumulator::new();
    let mut heart_rate = StatAccumulator::new();

    let mut records = Vec::with_capacity(samples.len());
    for sample in samples {
        let record = to_record(sample);
        speed.push(record.speed);
        temperature.push(record.temperature);
        altitude.push(record.altitude);
        gps_accuracy.push(record.gps_accuracy);
        heart_rate.push(record.heart_rate);
        records.push(record);
    }

    let total = sum_sessions(sessions, |s| s.total_elapsed_time.map(to_ms));
    let active = sum_sessions(sessions, |s| s.total_timer_time.map(to_ms));
    // pause only exists when both operands do
    let pause = match (total, active) {
        (Some(total), Some(active)) => Some(total.saturating_sub(active)),
        _ => None,
    };

    ActivityData {
        duration: DurationStats {
            total,
            active,
            pause,
        },
        total_distance: sum_sessions(sessions, |s| s.total_distance.map(meters_to_cm)),
        speed: speed.finish(),
        temperature: temperature.finish(),
        altitude: altitude.finish(),
        gps_accuracy: gps_accuracy.finish(),
        heart_rate: heart_rate.finish(),
        ascent: sum_sessions(sessions, |s| s.total_ascent),
        descent: sum_sessions(sessions, |s| s.total_descent),
        session_count: sessions.len() as u32,
        records,
    }
}

/// Convert one decoder sample into a model record, preferring the enhanced
/// (higher-resolution) speed/altitude variants and falling back to the
/// legacy fields, then to absent.
fn to_record(sample: &RecordSample) -> RecordData {
    RecordData {
        time: sample.time,
        distance: sample.distance.map(meters_to_cm),
        speed: sample
            .enhanced_speed
            .or(sample.speed)
            .map(|mps| mps * 1000.0),
        temperature: sample.temperature,
        altitude: sample.enhanced_altitude.or(sample.altitude),
        gps_accuracy: sample.gps_accuracy,
        heart_rate: sample.heart_rate,
    }
}

/// Sum one per-session value across sessions; absent iff no session
/// reports it.
fn sum_sessions<T>(
    sessions: &[SessionSummary],
    mut pick: impl FnMut(&SessionSummary) -> Option<T>,
) -> Option<T>
where
    T: std::ops::Add<Output = T>,
{
    sessions
        .iter()
        .filter_map(|session| pick(session))
        .reduce(|acc, value| acc + value)
}

fn to_ms(seconds: f64) -> u32 {
    (seconds * 1000.0).round() as u32
}

fn meters_to_cm(meters: f64) -> u32 {
    (meters * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn sample_at(secs: i64) -> RecordSample {
        let time = Local.timestamp_opt(secs, 0).unwrap();
        RecordSample {
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

    #[test]
    fn test_distance_summed_across_sessions() {
        let sessions = [
            SessionSummary {
                total_distance: Some(50.0),
                ..Default::default()
            },
            SessionSummary {
                total_distance: Some(32.0),
                ..Default::default()
            },
        ];
        let data = aggregate(&sessions, &[sample_at(0)]);
        // 50m + 32m in centimeters
        assert_eq!(data.total_distance, Some(8200));
        assert_eq!(data.session_count, 2);
    }

    #[test]
    fn test_temperature_channel_with_invalid_sample() {
        let mut samples = vec![sample_at(0), sample_at(1), sample_at(2)];
        samples[0].temperature = Some(18);
        samples[2].temperature = Some(22);

        let data = aggregate(&[SessionSummary::default()], &samples);
        assert_eq!(data.temperature.min, Some(18));
        assert_eq!(data.temperature.max, Some(22));
        assert_eq!(data.temperature.avg, Some(20));
        // the invalid sample's record field stays absent
        assert_eq!(data.records[1].temperature, None);
    }

    #[test]
    fn test_channel_without_samples_stays_absent() {
        let data = aggregate(&[SessionSummary::default()], &[sample_at(0)]);
        assert!(data.heart_rate.is_empty());
        assert!(data.speed.is_empty());
        assert_eq!(data.total_distance, None);
    }

    #[test]
    fn test_enhanced_fields_win_over_legacy() {
        let mut sample = sample_at(0);
        sample.speed = Some(2.0);
        sample.enhanced_speed = Some(2.5);
        sample.altitude = Some(100.0);
        sample.enhanced_altitude = Some(100.4);

        let data = aggregate(&[SessionSummary::default()], &[sample]);
        // 2.5 m/s in mm/s
        assert_eq!(data.records[0].speed, Some(2500.0));
        assert_eq!(data.records[0].altitude, Some(100.4));
    }

    #[test]
    fn test_legacy_fallback_when_enhanced_missing() {
        let mut sample = sample_at(0);
        sample.speed = Some(2.0);

        let data = aggregate(&[SessionSummary::default()], &[sample]);
        assert_eq!(data.records[0].speed, Some(2000.0));
    }

    #[test]
    fn test_pause_requires_both_operands() {
        let both = SessionSummary {
            total_elapsed_time: Some(100.0),
            total_timer_time: Some(90.0),
            ..Default::default()
        };
        let data = aggregate(&[both], &[sample_at(0)]);
        assert_eq!(data.duration.total, Some(100_000));
        assert_eq!(data.duration.active, Some(90_000));
        assert_eq!(data.duration.pause, Some(10_000));

        let only_total = SessionSummary {
            total_elapsed_time: Some(100.0),
            ..Default::default()
        };
        let data = aggregate(&[only_total], &[sample_at(0)]);
        assert_eq!(data.duration.pause, None);
    }

    #[test]
    fn test_records_keep_source_order() {
        let samples: Vec<_> = (0..5).map(sample_at).collect();
        let data = aggregate(&[SessionSummary::default()], &samples);
        let times: Vec<_> = data.records.iter().map(|r| r.time).collect();
        let mut sorted = times.clone();
        sorted.sort();
        assert_eq!(times, sorted);
        assert_eq!(data.record_count(), 5);
    }
}
