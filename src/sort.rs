//! Activity list ordering.
//!
//! Two orthogonal keys (start time, total distance), each with an
//! ascending/descending direction. Selecting the already-active key flips
//! its direction; selecting the other key starts it descending. Sorting is
//! stable (ties keep their pre-sort order) and only reorders the list —
//! activity payloads are untouched.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::model::{Activities, Activity};

/// Active sort key and direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    TimeDesc,
    TimeAsc,
    DistanceDesc,
    DistanceAsc,
}

impl SortKey {
    /// Select the time key: flips direction if already on time, otherwise
    /// switches to newest-first.
    pub fn select_time(self) -> Self {
        match self {
            SortKey::TimeDesc => SortKey::TimeAsc,
            SortKey::TimeAsc => SortKey::TimeDesc,
            _ => SortKey::TimeDesc,
        }
    }

    /// Select the distance key: flips direction if already on distance,
    /// otherwise switches to longest-first.
    pub fn select_distance(self) -> Self {
        match self {
            SortKey::DistanceDesc => SortKey::DistanceAsc,
            SortKey::DistanceAsc => SortKey::DistanceDesc,
            _ => SortKey::DistanceDesc,
        }
    }
}

/// Start time used for ordering; activities without a successful parse get
/// the Unix epoch so partially-imported lists stay sortable.
fn sortable_start_time(activity: &Activity) -> DateTime<Local> {
    activity
        .start_time()
        .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH.with_timezone(&Local))
}

/// Reorder the list in place by the given key. Stable.
pub fn sort_activities(activities: &mut Activities, key: SortKey) {
    match key {
        SortKey::TimeAsc => {
            activities.sort_by(|a, b| sortable_start_time(a).cmp(&sortable_start_time(b)));
        }
        SortKey::TimeDesc => {
            activities.sort_by(|a, b| sortable_start_time(b).cmp(&sortable_start_time(a)));
        }
        SortKey::DistanceAsc => {
            activities.sort_by(|a, b| a.total_distance().cmp(&b.total_distance()));
        }
        SortKey::DistanceDesc => {
            activities.sort_by(|a, b| b.total_distance().cmp(&a.total_distance()));
        }
    }
}
