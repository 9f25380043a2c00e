//! One-at-a-time background import pipeline.
//!
//! The [`Importer`] owns the activity list and is the only writer of its
//! [`AsyncData`] cells. Each file parse runs as a `spawn_blocking` task that
//! sends a [`ParseOutcome`] message back over an mpsc channel; the owning
//! event loop drains the channel and feeds [`Importer::apply`]. At most one
//! parse is outstanding at a time — the next activity enters `Loading` only
//! after the current one resolves, bounding resource use regardless of list
//! size.
//!
//! Cancellation is cooperative: a reload bumps the generation counter and
//! stale outcomes are discarded on arrival; in-flight parse work is never
//! aborted.

use std::path::PathBuf;

use log::{debug, info, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::asyncdata::AsyncData;
use crate::decode;
use crate::error::ActivityError;
use crate::model::{Activities, Activity, ActivityData};

/// Result of one background parse, tagged with the import run it belongs to.
#[derive(Debug)]
pub struct ParseOutcome {
    pub generation: u64,
    pub path: PathBuf,
    pub result: Result<ActivityData, ActivityError>,
}

/// Drives the `NotAsked -> Loading -> {Success, Failure}` sequence across
/// the activity list, strictly in list order.
///
/// Must live on a tokio runtime — parse tasks are spawned with
/// `tokio::task::spawn_blocking`.
pub struct Importer {
    activities: Activities,
    /// Incremented on every reload; outcomes from older runs are discarded.
    generation: u64,
    errors: Vec<ActivityError>,
    tx: UnboundedSender<ParseOutcome>,
    rx: UnboundedReceiver<ParseOutcome>,
}

impl Importer {
    /// Build an importer over discovered paths; every cell starts `NotAsked`.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            activities: paths.into_iter().map(Activity::not_asked).collect(),
            generation: 0,
            errors: Vec::new(),
            tx,
            rx,
        }
    }

    pub fn activities(&self) -> &Activities {
        &self.activities
    }

    /// Mutable access for the owning event loop (sorting, playback cursor).
    pub fn activities_mut(&mut self) -> &mut Activities {
        &mut self.activities
    }

    /// Errors collected so far in the current run, in arrival order.
    pub fn errors(&self) -> &[ActivityError] {
        &self.errors
    }

    /// Number of activities that parsed successfully.
    pub fn parsed_count(&self) -> usize {
        self.activities
            .iter()
            .filter(|act| act.data.is_success())
            .count()
    }

    /// Number of activities whose parse failed.
    pub fn failed_count(&self) -> usize {
        self.activities
            .iter()
            .filter(|act| act.data.is_failure())
            .count()
    }

    /// True while any activity still awaits its result.
    pub fn is_importing(&self) -> bool {
        self.activities
            .iter()
            .any(|act| act.data.is_not_asked() || act.data.is_loading())
    }

    /// Kick off the pipeline: the first pending activity enters `Loading`
    /// and its parse task is spawned. No-op if a parse is already in flight
    /// or nothing is pending.
    pub fn start(&mut self) {
        if self.activities.iter().any(|act| act.data.is_loading()) {
            return;
        }
        if let Some(index) = self.next_pending() {
            info!(
                "starting import of {} activities (generation {})",
                self.activities.len(),
                self.generation
            );
            self.dispatch(index);
        }
    }

    /// Restart from scratch: new generation, all cells back to `NotAsked`,
    /// error log cleared. Results still in flight from the old run will be
    /// ignored by their stale generation.
    pub fn reload(&mut self) {
        self.generation += 1;
        self.errors.clear();
        for activity in &mut self.activities {
            activity.data = AsyncData::NotAsked;
            activity.reset_record_index();
        }
        debug!("reload requested, now at generation {}", self.generation);
        self.start();
    }

    /// Commit one parse outcome. The single write path for `AsyncData`
    /// cells; also advances the pipeline to the next pending activity.
    pub fn apply(&mut self, outcome: ParseOutcome) {
        if outcome.generation != self.generation {
            debug!(
                "discarding stale parse result for '{}' (generation {} != {})",
                outcome.path.display(),
                outcome.generation,
                self.generation
            );
            return;
        }

        // locate by path: sorting may have reordered the list mid-import
        let Some(activity) = self
            .activities
            .iter_mut()
            .find(|act| act.path == outcome.path)
        else {
            warn!(
                "parse result for unknown activity '{}'",
                outcome.path.display()
            );
            return;
        };

        activity.reset_record_index();
        match outcome.result {
            Ok(data) => {
                info!(
                    "imported '{}' ({} records)",
                    outcome.path.display(),
                    data.record_count()
                );
                activity.data = AsyncData::Success(data);
            }
            Err(err) => {
                warn!("import failed: {err}");
                activity.data = AsyncData::Failure(err.clone());
                self.errors.push(err);
            }
        }

        if let Some(index) = self.next_pending() {
            self.dispatch(index);
        }
    }

    /// Wait for the next parse outcome. Returns `None` once the channel is
    /// closed, which cannot happen while the importer holds its sender.
    pub async fn next_outcome(&mut self) -> Option<ParseOutcome> {
        self.rx.recv().await
    }

    /// Non-blocking poll for rendering loops that tick at a fixed cadence.
    pub fn try_next_outcome(&mut self) -> Option<ParseOutcome> {
        self.rx.try_recv().ok()
    }

    /// Drive the pipeline until every activity has resolved.
    pub async fn run_to_completion(&mut self) {
        self.start();
        while self.is_importing() {
            match self.next_outcome().await {
                Some(outcome) => self.apply(outcome),
                None => break,
            }
        }
    }

    /// Index of the first activity still `NotAsked`, in list order.
    fn next_pending(&self) -> Option<usize> {
        self.activities
            .iter()
            .position(|act| act.data.is_not_asked())
    }

    /// Move one activity into `Loading` and spawn its parse task.
    fn dispatch(&mut self, index: usize) {
        let activity = &mut self.activities[index];
        let current = std::mem::replace(&mut activity.data, AsyncData::NotAsked);
        activity.data = current.reload();

        let path = activity.path.clone();
        let generation = self.generation;
        let tx = self.tx.clone();
        tokio::task::spawn_blocking(move || {
            let result = decode::parse_file(&path);
            // the importer may be gone; nothing to do then
            let _ = tx.send(ParseOutcome {
                generation,
                path,
                result,
            });
        });
    }
}
