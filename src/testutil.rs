//! Shared fixtures for unit tests.

use std::path::PathBuf;

use chrono::{Local, TimeZone};

use crate::asyncdata::AsyncData;
use crate::model::{Activity, ActivityData, DurationStats, RecordData};
use crate::stats::ChannelStats;

/// A record carrying only a timestamp, `secs` after the Unix epoch.
pub(crate) fn record_at(secs: i64) -> RecordData {
    RecordData::at(Local.timestamp_opt(secs, 0).unwrap())
}

/// Activity data with `count` one-second-spaced records and the given total
/// duration; every sensor channel left absent.
pub(crate) fn data_with_records(count: usize, total_ms: Option<u32>) -> ActivityData {
    ActivityData {
        duration: DurationStats {
            total: total_ms,
            active: None,
            pause: None,
        },
        total_distance: None,
        speed: ChannelStats::default(),
        temperature: ChannelStats::default(),
        altitude: ChannelStats::default(),
        gps_accuracy: ChannelStats::default(),
        heart_rate: ChannelStats::default(),
        ascent: None,
        descent: None,
        session_count: 1,
        records: (0..count).map(|i| record_at(i as i64)).collect(),
    }
}

/// A successfully parsed activity fixture.
pub(crate) fn parsed_activity(records: usize, total_ms: Option<u32>) -> Activity {
    let mut act = Activity::not_asked(PathBuf::from("test.fit"));
    act.data = AsyncData::Success(data_with_records(records, total_ms));
    act
}
