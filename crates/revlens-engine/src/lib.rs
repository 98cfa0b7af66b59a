//! # revlens-engine: Categorization & Aggregation Engine
//!
//! Given tokenized reviews and a keyword taxonomy, decides which categories
//! each review belongs to, derives a sentiment adjustment, and folds both
//! into per-category statistics.
//!
//! - **Taxonomy Index** (`index.rs`): keyword lookup built once from the
//!   taxonomy and passed by reference into every categorizer call.
//! - **Sentiment Scorer** (`sentiment.rs`): substring polarity counts with
//!   content-wide negation.
//! - **Categorizer** (`categorizer.rs`): substring OR token-exact keyword
//!   matching, per subcategory.
//! - **Aggregator** (`aggregator.rs`): strongly-typed accumulators created
//!   with zero state for every taxonomy node, consumed by `finalize`.
//! - **Engine** (`engine.rs`): validity check, tokenize, categorize, score,
//!   aggregate, finalize. Per-record failures are reported to a
//!   [`RunObserver`] and never abort the batch.
//! - **Tokenizer** (`tokenizer.rs`): the external tokenizer capability and
//!   two implementations.
//!
//! ## Pipeline
//!
//! ```text
//! TaxonomyIndex::build ─┐
//!                       ▼
//! record ─▶ validate ─▶ tokenize ─▶ categorize ─┐
//!                   └──────────▶ score ─────────┴─▶ Aggregator::update
//!                                       (all records) ─▶ Aggregator::finalize
//! ```

pub mod aggregator;
pub mod categorizer;
pub mod engine;
pub mod error;
pub mod index;
pub mod progress;
pub mod sentiment;
pub mod tokenizer;

pub use aggregator::{AccumulatorStats, Aggregator, AnalysisResults, CategoryStats, SubcategoryStats};
pub use categorizer::{categorize, Categorization, CategoryMatch};
pub use engine::{AnalysisReport, ClassifiedReview, Engine, EngineSettings, RunSummary};
pub use error::{EngineError, RecordFailure, TokenizeError};
pub use index::TaxonomyIndex;
pub use progress::{NoopObserver, Progress, RecordEvent, RecordEventKind, RunObserver, TracingObserver};
pub use sentiment::{score, SentimentBreakdown};
pub use tokenizer::{Tokenizer, UnicodeWordTokenizer, WhitespaceTokenizer};
