//! Wall-clock-synchronized record scrubbing.
//!
//! [`Playback`] moves one activity's selected record either manually
//! (discrete steps while paused) or automatically: on every UI tick the
//! elapsed wall-clock time since the last committed advance is converted
//! into a record delta via the activity's records-per-second rate and the
//! user's speed multiplier. Fractional advancement integrates across ticks —
//! the anchor timestamp only moves once at least one whole record was
//! consumed, so sub-1-RPS activities crawl forward instead of stalling.
//!
//! All time-dependent operations come in `_at` variants taking an explicit
//! [`Instant`]; the plain variants use `Instant::now()`. The algorithm is
//! tick-rate independent.

use std::time::Instant;

use crate::model::{Activities, Activity};

/// Coarse manual jump, roughly five minutes of records at 1 RPS.
pub const BOOST_JUMP_RECORDS: i64 = 300;

/// Transient speed multiplier bonus, applied for exactly one tick.
pub const SPEED_BOOST: u32 = 100;

/// Speed multiplier bounds.
pub const MIN_SPEED: u8 = 1;
pub const MAX_SPEED: u8 = 10;

/// Playback state for the currently selected activity.
#[derive(Debug, Clone)]
pub struct Playback {
    playing: bool,
    speed: u8,
    boost_armed: bool,
    last_update: Instant,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}

impl Playback {
    /// Paused, speed 1.
    pub fn new() -> Self {
        Self {
            playing: false,
            speed: MIN_SPEED,
            boost_armed: false,
            last_update: Instant::now(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Toggle play/pause, re-anchoring the elapsed-time baseline so time
    /// spent paused never turns into a burst of catch-up advancement.
    pub fn toggle(&mut self) {
        self.toggle_at(Instant::now());
    }

    pub fn toggle_at(&mut self, now: Instant) {
        self.playing = !self.playing;
        self.last_update = now;
    }

    /// Set the multiplier from a digit key; `0` maps to 10. Digits above 9
    /// are ignored.
    pub fn set_speed_digit(&mut self, digit: u8) {
        match digit {
            0 => self.speed = MAX_SPEED,
            1..=9 => self.speed = digit,
            _ => {}
        }
    }

    /// Step the multiplier by ±1, clamped to `[1, 10]`. Only honored while
    /// playing.
    pub fn step_speed(&mut self, delta: i8) {
        if !self.playing {
            return;
        }
        let speed = (self.speed as i8 + delta).clamp(MIN_SPEED as i8, MAX_SPEED as i8);
        self.speed = speed as u8;
    }

    /// Arm the one-tick speed boost. The next tick runs at
    /// `speed + SPEED_BOOST`; the tick after is back to normal.
    pub fn arm_boost(&mut self) {
        if self.playing {
            self.boost_armed = true;
        }
    }

    /// Manual step by `delta` records (negative steps back; use
    /// ±[`BOOST_JUMP_RECORDS`] for coarse jumps). Only honored while paused.
    pub fn step(&self, activity: &mut Activity, delta: i64) -> bool {
        if self.playing {
            return false;
        }
        activity.advance_record(delta)
    }

    /// Timed advancement for one UI tick at `Instant::now()`.
    pub fn tick(&mut self, activity: &mut Activity) -> u64 {
        self.tick_at(Instant::now(), activity)
    }

    /// Timed advancement: convert elapsed wall-clock time into whole
    /// records and move the activity's cursor. Returns the records consumed.
    pub fn tick_at(&mut self, now: Instant, activity: &mut Activity) -> u64 {
        if !self.playing {
            return 0;
        }

        let multiplier = if self.boost_armed {
            self.boost_armed = false;
            u32::from(self.speed) + SPEED_BOOST
        } else {
            u32::from(self.speed)
        };

        let elapsed_ms = now.saturating_duration_since(self.last_update).as_millis() as f64;
        let records = (elapsed_ms * activity.rps() / 1000.0 * f64::from(multiplier)).floor();
        if records >= 1.0 {
            activity.advance_record(records as i64);
            // anchor only moves when records were consumed, so fractional
            // progress keeps integrating across ticks
            self.last_update = now;
            records as u64
        } else {
            0
        }
    }
}

/// Reset the record cursor of every activity in the list. Idempotent.
pub fn reset_all_indices(activities: &mut Activities) {
    for activity in activities {
        activity.reset_record_index();
    }
}
