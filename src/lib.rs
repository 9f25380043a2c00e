//! # fit-activities
//!
//! Streaming statistics and live playback for FIT activity files.
//!
//! This library provides:
//! - Single-pass min/avg/max aggregation over sensor channels with
//!   sentinel-aware sample handling (invalid readings stay absent, never zero)
//! - An asynchronous import pipeline that parses one file at a time in the
//!   background and reports per-file success/failure without blocking the rest
//! - A wall-clock-synchronized playback scrubber with variable speed
//! - Stable sorting of the activity list by start time or total distance
//!
//! Rendering and CLI argument handling are deliberately left to the consuming
//! app shell: the shell owns an event loop, drains the importer's outcome
//! channel and reads the activity list; this crate owns all the state
//! transitions.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use fit_activities::{discover, Importer, Playback, SortKey};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), fit_activities::ActivityError> {
//! let paths = discover::find_fit_files(Path::new("./rides"))?;
//! let mut importer = Importer::new(paths);
//! importer.run_to_completion().await;
//!
//! fit_activities::sort::sort_activities(importer.activities_mut(), SortKey::TimeDesc);
//!
//! let mut playback = Playback::new();
//! if let Some(activity) = importer.activities_mut().first_mut() {
//!     playback.toggle(); // play
//!     playback.tick(activity);
//! }
//! # Ok(())
//! # }
//! ```

// Unified error handling
pub mod error;
pub use error::{ActivityError, Result};

// Streaming channel statistics
pub mod stats;
pub use stats::{ChannelStats, StatAccumulator};

// Four-state async lifecycle container
pub mod asyncdata;
pub use asyncdata::AsyncData;

// Core data model
pub mod model;
pub use model::{Activities, Activity, ActivityData, DurationStats, RecordData, FALLBACK_RPS};

// FIT decoder boundary
pub mod decode;
pub use decode::{RecordSample, SessionSummary};

// Statistics aggregation
pub mod aggregate;
pub use aggregate::aggregate;

// File discovery
pub mod discover;
pub use discover::find_fit_files;

// Background import pipeline
pub mod import;
pub use import::{Importer, ParseOutcome};

// Playback scrubbing
pub mod playback;
pub use playback::{Playback, BOOST_JUMP_RECORDS, MAX_SPEED, MIN_SPEED, SPEED_BOOST};

// Sorting
pub mod sort;
pub use sort::{sort_activities, SortKey};

// Value formatting for app shells
pub mod format;

#[cfg(test)]
pub(crate) mod testutil;
