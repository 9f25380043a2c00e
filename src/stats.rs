//! Streaming min/avg/max accumulation for sensor channels.
//!
//! Every scalar channel of a FIT activity (speed, temperature, altitude, GPS
//! accuracy, heart rate) runs through the same [`StatAccumulator`]. Samples
//! whose source value was invalid simply never reach the accumulator, so a
//! channel with zero valid samples ends up wholly absent — never a fake zero.

use serde::Serialize;

/// Numeric sample a channel accumulator can consume.
///
/// Connects the channel's native representation (e.g. `i8` degrees, `u8` bpm,
/// `f64` meters) to the `f64` running sum used for averaging.
pub trait Sample: Copy + PartialOrd {
    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_sample {
    ($($ty:ty),*) => {
        $(impl Sample for $ty {
            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(value: f64) -> Self {
                value as $ty
            }
        })*
    };
}

impl_sample!(i8, u8, u16, u32, f32, f64);

/// Bounded summary of one sensor channel.
///
/// All three fields are present iff at least one valid sample was seen.
/// Whenever present, `min <= avg <= max` holds up to integer rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg: Option<T>,
}

impl<T> Default for ChannelStats<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            avg: None,
        }
    }
}

impl<T> ChannelStats<T> {
    /// True if the channel never produced a valid sample.
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }
}

/// Internal running state, only allocated once a first valid sample arrives.
#[derive(Debug, Clone, Copy)]
struct Running<T> {
    min: T,
    max: T,
    sum: f64,
    count: u32,
}

/// Single-pass tri-state accumulator: unset until the first valid sample,
/// then tracks min/max/sum without buffering the series.
///
/// Min and max are seeded from the first valid value rather than from zero,
/// so sparse channels (a device that never reports temperature, say) cannot
/// pick up a false zero floor or ceiling.
///
/// # Example
/// ```
/// use fit_activities::stats::StatAccumulator;
///
/// let mut temp = StatAccumulator::new();
/// temp.push(Some(18i8));
/// temp.push(None); // invalid sample, ignored
/// temp.push(Some(22i8));
///
/// let stats = temp.finish();
/// assert_eq!(stats.min, Some(18));
/// assert_eq!(stats.max, Some(22));
/// assert_eq!(stats.avg, Some(20));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StatAccumulator<T: Sample> {
    state: Option<Running<T>>,
}

impl<T: Sample> Default for StatAccumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> StatAccumulator<T> {
    /// Create an accumulator in the unset state.
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Feed one optional sample; `None` (invalid at the source) is skipped.
    pub fn push(&mut self, value: Option<T>) {
        if let Some(v) = value {
            self.observe(v);
        }
    }

    /// Feed one valid sample.
    pub fn observe(&mut self, value: T) {
        match &mut self.state {
            None => {
                // first valid value seeds both bounds
                self.state = Some(Running {
                    min: value,
                    max: value,
                    sum: value.to_f64(),
                    count: 1,
                });
            }
            Some(running) => {
                if value < running.min {
                    running.min = value;
                }
                if value > running.max {
                    running.max = value;
                }
                running.sum += value.to_f64();
                running.count += 1;
            }
        }
    }

    /// Number of valid samples seen so far.
    pub fn count(&self) -> u32 {
        self.state.map_or(0, |running| running.count)
    }

    /// Finish the pass and emit the channel summary.
    ///
    /// The average rounds half away from zero, which keeps signed channels
    /// (temperature) free of the systematic bias truncation would introduce
    /// on negative values.
    pub fn finish(self) -> ChannelStats<T> {
        match self.state {
            None => ChannelStats::default(),
            Some(running) => {
                let avg = (running.sum / f64::from(running.count)).round();
                ChannelStats {
                    min: Some(running.min),
                    max: Some(running.max),
                    avg: Some(T::from_f64(avg)),
                }
            }
        }
    }
}
