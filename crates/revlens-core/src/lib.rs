//! # revlens-core: Foundational Types
//!
//! Shared vocabulary for every other crate in the workspace:
//!
//! - **Identifiers** (`identity.rs`): `CategoryId` and `SubcategoryId`
//!   newtypes, validated non-empty at construction. No bare strings for keys.
//!
//! - **Taxonomy** (`taxonomy.rs`): the immutable two-level tree of
//!   [`Category`] and [`Subcategory`] nodes, each subcategory owning a
//!   deduplicated keyword set and each category an optional score weight.
//!
//! - **Reviews** (`review.rs`): [`RawReviewRecord`] as handed over by a
//!   record source, and [`ReviewRecord`], the validated form. The validity
//!   check returns an explicit [`RecordSkip`] instead of raising.
//!
//! - **Sentiment lexicon** (`sentiment.rs`): positive/negative word lists and
//!   negation trigger phrases.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `revlens-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod review;
pub mod sentiment;
pub mod taxonomy;

pub use error::{RecordSkip, ValidationError};
pub use identity::{CategoryId, SubcategoryId};
pub use review::{RawReviewRecord, RetainedComment, ReviewRecord};
pub use sentiment::SentimentLexicon;
pub use taxonomy::{Category, Subcategory, Taxonomy, DEFAULT_CATEGORY_WEIGHT};
