//! # Engine
//!
//! Drives one analysis pass over a sequence of raw records:
//!
//! ```text
//! validate ─▶ tokenize ─▶ categorize ─▶ score ─▶ Aggregator::update
//! ```
//!
//! and finalizes the aggregator once at the end.
//!
//! ## Per-record failures
//!
//! A record that fails the validity check is skipped. A tokenizer error
//! degrades to an empty categorization: the record is still counted as
//! processed, it just lands in no category. A tokenizer panic or an
//! aggregator rejection marks the record failed and leaves every
//! accumulator untouched. None of these abort the batch; each one is
//! reported to the [`RunObserver`].
//!
//! ## Parallelism
//!
//! Classification (tokenize, categorize, score) is a pure function of one
//! record. [`Engine::run_parallel`] fans it out with `rayon` and folds the
//! classified records into the aggregator on the calling thread, in input
//! order, so its output is identical to [`Engine::run`].

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rayon::prelude::*;
use serde::Serialize;

use revlens_core::{RawReviewRecord, ReviewRecord, SentimentLexicon, Taxonomy};

use crate::aggregator::{AnalysisResults, Aggregator};
use crate::categorizer::{categorize, Categorization};
use crate::error::RecordFailure;
use crate::index::TaxonomyIndex;
use crate::progress::{self, ProgressClock, RecordEvent, RecordEventKind, RunObserver, TracingObserver};
use crate::sentiment;
use crate::tokenizer::{Tokenizer, UnicodeWordTokenizer};

/// Default time between progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Settings and outputs
// ---------------------------------------------------------------------------

/// Tunables for one engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Minimum time between progress reports. Zero disables them.
    pub progress_interval: Duration,
    /// Cap on retained comments per accumulator; `None` keeps every comment.
    pub max_retained_comments: Option<usize>,
    /// Classify records on the rayon pool in [`Engine::analyze`].
    pub parallel: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            max_retained_comments: None,
            parallel: false,
        }
    }
}

/// A valid record together with everything derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedReview {
    pub record: ReviewRecord,
    pub categorization: Categorization,
    pub sentiment: f64,
    /// Set when the tokenizer failed and the categorization is empty.
    pub tokenization_error: Option<String>,
}

/// Counters for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Records examined before completion or cancellation.
    pub total: usize,
    /// Valid records folded into the aggregator.
    pub processed: usize,
    /// Records rejected by the validity check.
    pub skipped: usize,
    /// Records dropped by an unexpected failure.
    pub failed: usize,
    /// Processed records whose tokenization failed.
    pub tokenization_failures: usize,
    pub elapsed: Duration,
    /// Records examined per second.
    pub throughput: f64,
    /// The run stopped early on the cancellation flag.
    pub cancelled: bool,
}

/// Finalized results plus the run counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub results: AnalysisResults,
    pub summary: RunSummary,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Categorization and aggregation engine bound to one taxonomy.
pub struct Engine {
    taxonomy: Taxonomy,
    index: TaxonomyIndex,
    lexicon: SentimentLexicon,
    tokenizer: Box<dyn Tokenizer>,
    settings: EngineSettings,
    observer: Arc<dyn RunObserver>,
    cancel: Option<Arc<AtomicBool>>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("categories", &self.taxonomy.len())
            .field("settings", &self.settings)
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Build the taxonomy index and an engine with default settings, the
    /// Unicode word tokenizer and a `tracing` observer.
    pub fn new(taxonomy: Taxonomy, lexicon: SentimentLexicon) -> Self {
        let index = TaxonomyIndex::build(&taxonomy);
        tracing::debug!(
            categories = taxonomy.len(),
            subcategories = taxonomy.subcategory_count(),
            keywords = taxonomy.keyword_count(),
            "taxonomy index built"
        );
        Self {
            taxonomy,
            index,
            lexicon,
            tokenizer: Box::new(UnicodeWordTokenizer::new()),
            settings: EngineSettings::default(),
            observer: Arc::new(TracingObserver),
            cancel: None,
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn RunObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Stop between records once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn index(&self) -> &TaxonomyIndex {
        &self.index
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Validate, tokenize, categorize and score one record.
    ///
    /// # Errors
    ///
    /// [`RecordFailure::Skip`] when the record fails the validity check,
    /// [`RecordFailure::Unexpected`] when the tokenizer panics.
    pub fn classify(&self, raw: RawReviewRecord) -> Result<ClassifiedReview, RecordFailure> {
        let record = raw.validate()?;

        let tokenized = panic::catch_unwind(AssertUnwindSafe(|| self.tokenizer.tokenize(&record.content)))
            .map_err(|payload| {
                RecordFailure::Unexpected(format!("tokenizer panicked: {}", panic_message(&*payload)))
            })?;

        let (categorization, tokenization_error) = match tokenized {
            Ok(tokens) => (categorize(&record.content, &tokens, &self.index), None),
            Err(e) => (Categorization::default(), Some(e.message)),
        };
        let sentiment = sentiment::score(&record.content, &self.lexicon);

        Ok(ClassifiedReview {
            record,
            categorization,
            sentiment,
            tokenization_error,
        })
    }

    /// Sequential pass over `records`.
    pub fn run<I>(&self, records: I) -> AnalysisReport
    where
        I: IntoIterator<Item = RawReviewRecord>,
    {
        let records = records.into_iter();
        let total = match records.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(lower),
            _ => None,
        };
        tracing::info!(total = ?total, "analysis started");

        let mut pass = Pass::new(self, total);
        for raw in records {
            if self.is_cancelled() {
                pass.cancelled = true;
                break;
            }
            let record_id = raw.id.clone();
            let outcome = self.classify(raw);
            pass.fold(record_id, outcome);
        }
        pass.finish()
    }

    /// Parallel classification, sequential in-order aggregation.
    pub fn run_parallel(&self, records: Vec<RawReviewRecord>) -> AnalysisReport {
        let total = records.len();
        tracing::info!(total, threads = rayon::current_num_threads(), "parallel analysis started");

        let classified: Vec<Option<(String, Result<ClassifiedReview, RecordFailure>)>> = records
            .into_par_iter()
            .map(|raw| {
                if self.is_cancelled() {
                    return None;
                }
                let record_id = raw.id.clone();
                Some((record_id, self.classify(raw)))
            })
            .collect();

        let mut pass = Pass::new(self, Some(total));
        for item in classified {
            match item {
                Some((record_id, outcome)) => pass.fold(record_id, outcome),
                None => {
                    pass.cancelled = true;
                    break;
                }
            }
        }
        pass.finish()
    }

    /// Run sequentially or in parallel according to the settings.
    pub fn analyze(&self, records: Vec<RawReviewRecord>) -> AnalysisReport {
        if self.settings.parallel {
            self.run_parallel(records)
        } else {
            self.run(records)
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

// ---------------------------------------------------------------------------
// Pass
// ---------------------------------------------------------------------------

/// Aggregation state of one run, owned by the driving thread.
struct Pass<'e> {
    engine: &'e Engine,
    aggregator: Aggregator,
    clock: ProgressClock,
    total: Option<usize>,
    seen: usize,
    processed: usize,
    skipped: usize,
    failed: usize,
    tokenization_failures: usize,
    cancelled: bool,
}

impl<'e> Pass<'e> {
    fn new(engine: &'e Engine, total: Option<usize>) -> Self {
        Self {
            engine,
            aggregator: Aggregator::new(&engine.taxonomy, engine.settings.max_retained_comments),
            clock: ProgressClock::start(engine.settings.progress_interval),
            total,
            seen: 0,
            processed: 0,
            skipped: 0,
            failed: 0,
            tokenization_failures: 0,
            cancelled: false,
        }
    }

    fn fold(&mut self, record_id: String, outcome: Result<ClassifiedReview, RecordFailure>) {
        self.seen += 1;
        match outcome {
            Ok(review) => self.aggregate(record_id, review),
            Err(RecordFailure::Skip(reason)) => {
                self.skipped += 1;
                self.emit(record_id, RecordEventKind::Skipped(reason));
            }
            Err(RecordFailure::Unexpected(message)) => {
                self.failed += 1;
                self.emit(record_id, RecordEventKind::Failed(message));
            }
        }
        if let Some(progress) = self.clock.tick(self.seen, self.total) {
            self.engine.observer.on_progress(&progress);
        }
    }

    fn aggregate(&mut self, record_id: String, review: ClassifiedReview) {
        let ClassifiedReview {
            record,
            categorization,
            sentiment,
            tokenization_error,
        } = review;

        if let Err(e) = self
            .aggregator
            .update(&categorization, record.rating, &record.content, sentiment)
        {
            self.failed += 1;
            self.emit(record_id, RecordEventKind::Failed(e.to_string()));
            return;
        }

        self.processed += 1;
        tracing::trace!(
            record = %record_id,
            categories = categorization.len(),
            sentiment,
            "record aggregated"
        );
        if let Some(message) = tokenization_error {
            self.tokenization_failures += 1;
            self.emit(record_id, RecordEventKind::TokenizationFailed(message));
        }
    }

    fn emit(&self, record_id: String, kind: RecordEventKind) {
        self.engine
            .observer
            .on_record_event(&RecordEvent { record_id, kind });
    }

    fn finish(self) -> AnalysisReport {
        let elapsed = self.clock.elapsed();
        let summary = RunSummary {
            total: self.seen,
            processed: self.processed,
            skipped: self.skipped,
            failed: self.failed,
            tokenization_failures: self.tokenization_failures,
            elapsed,
            throughput: progress::throughput(self.seen, elapsed),
            cancelled: self.cancelled,
        };
        self.engine.observer.on_complete(&summary);
        AnalysisReport {
            results: self.aggregator.finalize(),
            summary,
        }
    }
}
