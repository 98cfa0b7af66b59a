//! # revlens-config: Taxonomy Source
//!
//! Turns a YAML taxonomy file into an [`AnalysisConfig`]: the immutable
//! [`Taxonomy`](revlens_core::Taxonomy) plus the
//! [`SentimentLexicon`](revlens_core::SentimentLexicon).
//!
//! Any structural problem (no category tree, a category without a name, a
//! negative weight) is a [`ConfigError`] and is fatal: it surfaces before
//! the engine sees a single record. Callers that want to continue with the
//! built-in sample taxonomy must ask for it explicitly via
//! [`builtin_config`].

pub mod error;
pub mod loader;

pub use error::{ConfigError, ConfigResult};
pub use loader::{builtin_config, load_config, parse_config, AnalysisConfig};
