//! # Review Taxonomy
//!
//! The fixed two-level tree reviews are bucketed into. A [`Taxonomy`] is
//! built once at startup by a configuration loader and never mutated
//! afterwards; every accessor hands out shared references.
//!
//! ## Ordering
//!
//! Categories and subcategories keep their declaration order. Categorizer
//! output and every report follow that order, so two runs over the same
//! configuration render identically.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::error::ValidationError;
use crate::identity::{CategoryId, SubcategoryId};

/// Weight applied to raw ratings when a category has no explicit weight.
pub const DEFAULT_CATEGORY_WEIGHT: f64 = 1.0;

/// A leaf of the taxonomy: a named keyword set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subcategory {
    id: SubcategoryId,
    name: String,
    keywords: BTreeSet<String>,
}

impl Subcategory {
    /// Build a subcategory. Duplicate keywords collapse; empty keywords are
    /// dropped since an empty string is contained in every text.
    pub fn new<I, S>(id: SubcategoryId, name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords = keywords
            .into_iter()
            .map(Into::into)
            .filter(|k: &String| !k.is_empty())
            .collect();
        Self {
            id,
            name: name.into(),
            keywords,
        }
    }

    pub fn id(&self) -> &SubcategoryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keyword set, iterated in lexical order.
    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }
}

/// A top-level category with its subcategories and score weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    weight: f64,
    subcategories: Vec<Subcategory>,
}

impl Category {
    /// Build a category with the default weight.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateSubcategory`] if two
    /// subcategories share an identifier.
    pub fn new(
        id: CategoryId,
        name: impl Into<String>,
        subcategories: Vec<Subcategory>,
    ) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for sub in &subcategories {
            if !seen.insert(sub.id()) {
                return Err(ValidationError::DuplicateSubcategory {
                    category: id.to_string(),
                    subcategory: sub.id().to_string(),
                });
            }
        }
        Ok(Self {
            id,
            name: name.into(),
            weight: DEFAULT_CATEGORY_WEIGHT,
            subcategories,
        })
    }

    /// Replace the weight applied to ratings folded into this category.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidWeight`] for NaN, infinite or
    /// negative weights.
    pub fn with_weight(mut self, weight: f64) -> Result<Self, ValidationError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ValidationError::InvalidWeight {
                category: self.id.to_string(),
                weight,
            });
        }
        self.weight = weight;
        Ok(self)
    }

    pub fn id(&self) -> &CategoryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn subcategories(&self) -> &[Subcategory] {
        &self.subcategories
    }

    /// Look up a subcategory by identifier.
    pub fn subcategory(&self, id: &SubcategoryId) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.id() == id)
    }
}

/// The complete, immutable category tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

impl Taxonomy {
    /// Assemble a taxonomy from categories in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateCategory`] if two categories share
    /// an identifier.
    pub fn new(categories: Vec<Category>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for cat in &categories {
            if !seen.insert(cat.id()) {
                return Err(ValidationError::DuplicateCategory(cat.id().to_string()));
            }
        }
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id() == id)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of subcategories across all categories.
    pub fn subcategory_count(&self) -> usize {
        self.categories.iter().map(|c| c.subcategories().len()).sum()
    }

    /// Total number of distinct keywords per subcategory, summed.
    pub fn keyword_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| c.subcategories())
            .map(|s| s.keywords().len())
            .sum()
    }
}
