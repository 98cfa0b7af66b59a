//! # Run Observation
//!
//! Progress reporting and per-record diagnostics are delivered through a
//! [`RunObserver`] instead of being written to a console directly. The
//! engine calls the observer from the thread driving the run; a slow
//! observer slows the run but cannot change its result.

use std::fmt;
use std::time::{Duration, Instant};

use revlens_core::RecordSkip;

use crate::engine::RunSummary;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A periodic progress snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Records handled so far, including skipped and failed ones.
    pub processed: usize,
    /// Total records, when the source knows it up front.
    pub total: Option<usize>,
    pub elapsed: Duration,
    /// Records per second since the start of the run.
    pub throughput: f64,
}

impl Progress {
    /// Completion percentage, if the total is known and non-zero.
    pub fn percent(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => Some(self.processed as f64 / total as f64 * 100.0),
            _ => None,
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.total, self.percent()) {
            (Some(total), Some(pct)) => write!(
                f,
                "{}/{} ({pct:.1}%) {:.1} rec/s",
                self.processed, total, self.throughput
            ),
            _ => write!(f, "{} {:.1} rec/s", self.processed, self.throughput),
        }
    }
}

/// What happened to one record outside the normal path.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordEventKind {
    /// Excluded by the validity check.
    Skipped(RecordSkip),
    /// The tokenizer failed; the record was aggregated with no
    /// categorization.
    TokenizationFailed(String),
    /// Processing failed unexpectedly; the record was not aggregated.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordEvent {
    pub record_id: String,
    pub kind: RecordEventKind,
}

// ---------------------------------------------------------------------------
// Observer
// ---------------------------------------------------------------------------

/// Receives progress and diagnostics during a run. Every method has a no-op
/// default.
pub trait RunObserver: Send + Sync {
    fn on_progress(&self, _progress: &Progress) {}

    fn on_record_event(&self, _event: &RecordEvent) {}

    fn on_complete(&self, _summary: &RunSummary) {}
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Forwards events to `tracing`: progress and completion at `info`, skips
/// at `debug`, tokenizer and processing failures at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn on_progress(&self, progress: &Progress) {
        tracing::info!(
            processed = progress.processed,
            total = progress.total,
            elapsed_secs = progress.elapsed.as_secs_f64(),
            throughput = progress.throughput,
            "progress: {progress}"
        );
    }

    fn on_record_event(&self, event: &RecordEvent) {
        match &event.kind {
            RecordEventKind::Skipped(reason) => {
                tracing::debug!(record = %event.record_id, %reason, "record skipped");
            }
            RecordEventKind::TokenizationFailed(message) => {
                tracing::warn!(record = %event.record_id, %message, "tokenization failed");
            }
            RecordEventKind::Failed(message) => {
                tracing::warn!(record = %event.record_id, %message, "record failed");
            }
        }
    }

    fn on_complete(&self, summary: &RunSummary) {
        tracing::info!(
            total = summary.total,
            processed = summary.processed,
            skipped = summary.skipped,
            failed = summary.failed,
            tokenization_failures = summary.tokenization_failures,
            elapsed_secs = summary.elapsed.as_secs_f64(),
            cancelled = summary.cancelled,
            "analysis complete"
        );
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Time-based progress cadence.
#[derive(Debug)]
pub(crate) struct ProgressClock {
    started: Instant,
    last_report: Instant,
    interval: Duration,
}

impl ProgressClock {
    pub(crate) fn start(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_report: now,
            interval,
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// A snapshot if at least one interval has passed since the last one.
    /// A zero interval disables periodic reports.
    pub(crate) fn tick(&mut self, processed: usize, total: Option<usize>) -> Option<Progress> {
        if self.interval.is_zero() {
            return None;
        }
        let now = Instant::now();
        if now.duration_since(self.last_report) < self.interval {
            return None;
        }
        self.last_report = now;
        Some(self.snapshot(processed, total))
    }

    pub(crate) fn snapshot(&self, processed: usize, total: Option<usize>) -> Progress {
        let elapsed = self.elapsed();
        Progress {
            processed,
            total,
            elapsed,
            throughput: throughput(processed, elapsed),
        }
    }
}

pub(crate) fn throughput(processed: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        processed as f64 / secs
    } else {
        0.0
    }
}
