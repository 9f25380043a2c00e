//! Human-readable formatting of model values.
//!
//! Pure helpers for an app shell: the model keeps raw units (ms, cm, mm/s),
//! these render them the way the list and detail views expect.

use chrono::{DateTime, Local};

/// Shown wherever a value is absent.
pub const NO_DATA: &str = "no data";

/// `dd.mm.yy hh:mm` local time.
pub fn format_time(time: DateTime<Local>) -> String {
    time.format("%d.%m.%y %H:%M").to_string()
}

/// Milliseconds as `3s`, `4m 5s`, `2h 4m 5s` or `1d 2h 4m 5s`.
pub fn format_duration(ms: u32) -> String {
    let total_seconds = ms / 1000;
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    if total_seconds < 60 {
        format!("{seconds}s")
    } else if total_seconds < 3_600 {
        format!("{minutes}m {seconds}s")
    } else if total_seconds < 86_400 {
        format!("{hours}h {minutes}m {seconds}s")
    } else {
        format!("{days}d {hours}h {minutes}m {seconds}s")
    }
}

/// Centimeters as `750m` below one kilometer, `12.3km` above (decimals
/// trimmed of trailing zeroes).
pub fn format_distance(cm: u32) -> String {
    format_distance_with_decimals(cm, 1)
}

/// Like [`format_distance`] but with a fixed number of km decimals.
pub fn format_distance_with_decimals(cm: u32, decimals: usize) -> String {
    let meters = cm / 100;
    if meters < 1000 {
        return format!("{meters}m");
    }
    let km = f64::from(meters) / 1000.0;
    let mut formatted = format!("{km:.decimals$}");
    if formatted.contains('.') {
        formatted = formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string();
    }
    format!("{formatted}km")
}

/// Speed in mm/s as km/h with one decimal.
pub fn format_speed(mm_per_s: f64) -> String {
    format!("{:.1}km/h", mm_per_s * 3.6 / 1000.0)
}

pub fn format_temperature(celsius: i8) -> String {
    format!("{celsius}°C")
}

pub fn format_altitude(meters: f64) -> String {
    format!("{meters:.0}m")
}

pub fn format_elevation(meters: u16) -> String {
    format!("{meters}m")
}

pub fn format_gps_accuracy(meters: u8) -> String {
    format!("{meters}m")
}

pub fn format_heart_rate(bpm: u8) -> String {
    format!("{bpm}bpm")
}
