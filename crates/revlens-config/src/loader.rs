//! # Taxonomy Loader
//!
//! Reads the YAML document shape below into strongly-typed values:
//!
//! ```yaml
//! categories:                 # alias: game_review_categories
//!   game_mechanics:
//!     name: Game mechanics
//!     weight: 1.0             # optional
//!     subcategories:
//!       core_gameplay:
//!         name: Core gameplay
//!         keywords: [battle, controls]
//! sentiment_words:
//!   positive: [fun, great]
//!   negative: [boring, bug]
//! negation_patterns: [not, never]
//! category_weights:
//!   game_mechanics: 1.2
//! ```
//!
//! Mapping order in the file becomes taxonomy order, so categories are read
//! through `serde_yaml::Mapping` rather than a hash map. `category_weights`
//! entries override inline `weight` values; an entry naming an unknown
//! category is logged and ignored.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use revlens_core::{Category, CategoryId, SentimentLexicon, Subcategory, SubcategoryId, Taxonomy};

use crate::error::{ConfigError, ConfigResult};

/// Everything the engine needs besides the records themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub taxonomy: Taxonomy,
    pub sentiment: SentimentLexicon,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(alias = "game_review_categories")]
    categories: Option<serde_yaml::Mapping>,
    #[serde(default)]
    sentiment_words: Option<RawSentimentWords>,
    #[serde(default)]
    negation_patterns: Option<Vec<String>>,
    #[serde(default)]
    category_weights: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSentimentWords {
    #[serde(default)]
    positive: Option<Vec<String>>,
    #[serde(default)]
    negative: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    name: String,
    #[serde(default)]
    weight: Option<f64>,
    #[serde(default)]
    subcategories: Option<serde_yaml::Mapping>,
}

#[derive(Debug, Deserialize)]
struct RawSubcategory {
    name: String,
    #[serde(default)]
    keywords: Option<Vec<String>>,
}

/// Load a taxonomy configuration from a YAML file.
///
/// # Errors
///
/// - [`ConfigError::FileNotFound`] if `path` does not exist.
/// - [`ConfigError::YamlParse`] if the file is not valid YAML.
/// - Any structural error from [`parse_config`]; these are never reported
///   as YAML errors, even when a section has the wrong type.
pub fn load_config(path: &Path) -> ConfigResult<AnalysisConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io(e)
        }
    })?;
    let document: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::YamlParse {
            path: path.to_path_buf(),
            source: e,
        })?;
    let config = build_config(shape(document)?)?;
    tracing::info!(
        path = %path.display(),
        categories = config.taxonomy.len(),
        subcategories = config.taxonomy.subcategory_count(),
        positive_words = config.sentiment.positive.len(),
        negative_words = config.sentiment.negative.len(),
        "loaded taxonomy configuration"
    );
    Ok(config)
}

/// Parse a taxonomy configuration from a YAML string.
///
/// # Errors
///
/// - [`ConfigError::Yaml`] if the text is not valid YAML.
/// - [`ConfigError::InvalidStructure`] if a top-level section has the wrong
///   shape.
/// - [`ConfigError::MissingSection`] if there is no category tree.
/// - [`ConfigError::InvalidCategory`] or [`ConfigError::Validation`] for a
///   malformed category or subcategory.
pub fn parse_config(yaml: &str) -> ConfigResult<AnalysisConfig> {
    let document: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    build_config(shape(document)?)
}

/// The built-in sample taxonomy for Japanese game store reviews.
///
/// Only used when a caller explicitly asks for it, e.g. after the
/// configured file failed to parse.
pub fn builtin_config() -> ConfigResult<AnalysisConfig> {
    parse_config(include_str!("builtin.yaml"))
}

// Syntax is checked by the caller; anything failing here is well-formed YAML.
fn shape(document: serde_yaml::Value) -> ConfigResult<RawConfig> {
    if document.is_null() {
        return Err(ConfigError::MissingSection {
            section: "categories",
        });
    }
    serde_yaml::from_value(document).map_err(|e| ConfigError::InvalidStructure {
        detail: e.to_string(),
    })
}

fn build_config(raw: RawConfig) -> ConfigResult<AnalysisConfig> {
    let tree = raw.categories.ok_or(ConfigError::MissingSection {
        section: "categories",
    })?;

    let mut categories = Vec::with_capacity(tree.len());
    for (key, value) in tree {
        let id = mapping_key(&key, "categories")?;
        let path = format!("categories.{id}");
        let raw_cat: RawCategory =
            serde_yaml::from_value(value).map_err(|e| ConfigError::InvalidCategory {
                path: path.clone(),
                detail: e.to_string(),
            })?;
        categories.push(build_category(CategoryId::new(id)?, &path, raw_cat)?);
    }

    if let Some(weights) = raw.category_weights {
        apply_weight_overrides(&mut categories, weights)?;
    }

    let taxonomy = Taxonomy::new(categories)?;
    let words = raw.sentiment_words.unwrap_or_default();
    let sentiment = SentimentLexicon {
        positive: words.positive.unwrap_or_default(),
        negative: words.negative.unwrap_or_default(),
        negation_patterns: raw.negation_patterns.unwrap_or_default(),
    };

    Ok(AnalysisConfig {
        taxonomy,
        sentiment,
    })
}

fn build_category(id: CategoryId, path: &str, raw: RawCategory) -> ConfigResult<Category> {
    let mut subcategories = Vec::new();
    for (key, value) in raw.subcategories.unwrap_or_default() {
        let sub_id = mapping_key(&key, path)?;
        let sub_path = format!("{path}.subcategories.{sub_id}");
        let raw_sub: RawSubcategory =
            serde_yaml::from_value(value).map_err(|e| ConfigError::InvalidCategory {
                path: sub_path.clone(),
                detail: e.to_string(),
            })?;
        let keywords = raw_sub.keywords.unwrap_or_default();
        if keywords.is_empty() {
            tracing::warn!(subcategory = %sub_path, "subcategory has no keywords and can never match");
        }
        subcategories.push(Subcategory::new(
            SubcategoryId::new(sub_id)?,
            raw_sub.name,
            keywords,
        ));
    }

    let category = Category::new(id, raw.name, subcategories)?;
    match raw.weight {
        Some(w) => Ok(category.with_weight(w)?),
        None => Ok(category),
    }
}

fn apply_weight_overrides(
    categories: &mut [Category],
    weights: BTreeMap<String, f64>,
) -> ConfigResult<()> {
    for (key, weight) in weights {
        match categories.iter_mut().find(|c| c.id().as_str() == key) {
            Some(slot) => {
                *slot = slot.clone().with_weight(weight)?;
            }
            None => {
                tracing::warn!(category = %key, "weight configured for unknown category; ignored");
            }
        }
    }
    Ok(())
}

fn mapping_key(key: &serde_yaml::Value, parent: &str) -> ConfigResult<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        other => Err(ConfigError::InvalidCategory {
            path: parent.to_string(),
            detail: format!("mapping key must be a string, got {other:?}"),
        }),
    }
}
