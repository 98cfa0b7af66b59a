//! # Aggregator
//!
//! Per-category and per-subcategory running totals for one analysis pass.
//!
//! ## Lifecycle
//!
//! 1. [`Aggregator::new`] creates a zeroed accumulator for every category
//!    and subcategory declared in the taxonomy, including ones that never
//!    match. Nothing is created on first access.
//! 2. [`Aggregator::update`] folds one classified review in.
//! 3. [`Aggregator::finalize`] consumes the aggregator and divides sums by
//!    counts. Because it takes `self`, a second normalization cannot be
//!    expressed.
//!
//! ## Counting
//!
//! A review matching subcategories S1 and S2 of category C credits C once
//! and each of S1, S2 once, all with the same weighted score. Category counts
//! are distinct reviews; subcategory counts may sum to more than their
//! parent's. A subcategory count never exceeds its parent's.

use std::collections::HashMap;

use serde::Serialize;

use revlens_core::{CategoryId, RetainedComment, SubcategoryId, Taxonomy};

use crate::categorizer::Categorization;
use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Accumulator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
struct Accumulator {
    comment_count: u64,
    satisfaction_sum: f64,
    rating_sum: f64,
    comments: Vec<RetainedComment>,
}

impl Accumulator {
    fn record(&mut self, weighted_score: f64, comment: &RetainedComment, retention: Option<usize>) {
        self.comment_count += 1;
        self.satisfaction_sum += weighted_score;
        self.rating_sum += comment.rating as f64;
        if retention.map_or(true, |cap| self.comments.len() < cap) {
            self.comments.push(comment.clone());
        }
    }

    fn finalize(self) -> AccumulatorStats {
        let (satisfaction_score, average_score) = if self.comment_count > 0 {
            let n = self.comment_count as f64;
            (self.satisfaction_sum / n, self.rating_sum / n)
        } else {
            (0.0, 0.0)
        };
        AccumulatorStats {
            comment_count: self.comment_count,
            average_score,
            satisfaction_score,
            comments: self.comments,
        }
    }
}

#[derive(Debug, Clone)]
struct SubcategorySlot {
    id: SubcategoryId,
    name: String,
    totals: Accumulator,
}

#[derive(Debug, Clone)]
struct CategorySlot {
    id: CategoryId,
    name: String,
    weight: f64,
    totals: Accumulator,
    subcategories: Vec<SubcategorySlot>,
    sub_positions: HashMap<SubcategoryId, usize>,
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

/// Mutable accumulator set for one run.
#[derive(Debug, Clone)]
pub struct Aggregator {
    categories: Vec<CategorySlot>,
    positions: HashMap<CategoryId, usize>,
    retention: Option<usize>,
}

impl Aggregator {
    /// Zeroed accumulators for every node of `taxonomy`. `retention` caps the
    /// number of comments kept per accumulator (`None` keeps all).
    pub fn new(taxonomy: &Taxonomy, retention: Option<usize>) -> Self {
        let categories: Vec<CategorySlot> = taxonomy
            .categories()
            .iter()
            .map(|cat| {
                let subcategories: Vec<SubcategorySlot> = cat
                    .subcategories()
                    .iter()
                    .map(|sub| SubcategorySlot {
                        id: sub.id().clone(),
                        name: sub.name().to_string(),
                        totals: Accumulator::default(),
                    })
                    .collect();
                let sub_positions = subcategories
                    .iter()
                    .enumerate()
                    .map(|(i, s)| (s.id.clone(), i))
                    .collect();
                CategorySlot {
                    id: cat.id().clone(),
                    name: cat.name().to_string(),
                    weight: cat.weight(),
                    totals: Accumulator::default(),
                    subcategories,
                    sub_positions,
                }
            })
            .collect();
        let positions = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        Self {
            categories,
            positions,
            retention,
        }
    }

    /// Fold one review into every category and subcategory it matched.
    ///
    /// `sentiment` is computed once per review and reused for every matched
    /// category: weighted score = `rating × category weight + sentiment`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the categorization names a node this
    /// aggregator does not know. All references are resolved before any
    /// accumulator is touched, so an error leaves the aggregator unchanged.
    pub fn update(
        &mut self,
        categorization: &Categorization,
        rating: i64,
        content: &str,
        sentiment: f64,
    ) -> Result<(), EngineError> {
        let resolved = self.resolve(categorization)?;
        let comment = RetainedComment {
            text: content.to_string(),
            rating,
        };

        for (cat_idx, sub_idxs) in resolved {
            let slot = &mut self.categories[cat_idx];
            let weighted_score = rating as f64 * slot.weight + sentiment;
            slot.totals.record(weighted_score, &comment, self.retention);
            for sub_idx in sub_idxs {
                slot.subcategories[sub_idx]
                    .totals
                    .record(weighted_score, &comment, self.retention);
            }
        }
        Ok(())
    }

    fn resolve(&self, categorization: &Categorization) -> Result<Vec<(usize, Vec<usize>)>, EngineError> {
        categorization
            .matches()
            .iter()
            .map(|m| {
                let cat_idx = *self
                    .positions
                    .get(&m.category)
                    .ok_or_else(|| EngineError::UnknownCategory(m.category.to_string()))?;
                let slot = &self.categories[cat_idx];
                let sub_idxs = m
                    .subcategories
                    .iter()
                    .map(|sub| {
                        slot.sub_positions.get(sub).copied().ok_or_else(|| {
                            EngineError::UnknownSubcategory {
                                category: m.category.to_string(),
                                subcategory: sub.to_string(),
                            }
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((cat_idx, sub_idxs))
            })
            .collect()
    }

    /// Current count of a category, before finalization.
    pub fn comment_count(&self, category: &CategoryId) -> Option<u64> {
        self.positions
            .get(category)
            .map(|&i| self.categories[i].totals.comment_count)
    }

    /// Normalize sums into averages and hand out the read-only results.
    /// Accumulators with no comments report zero scores.
    ///
    /// The aggregator is consumed, so it cannot be normalized twice:
    ///
    /// ```compile_fail
    /// use revlens_core::Taxonomy;
    /// use revlens_engine::Aggregator;
    ///
    /// let taxonomy = Taxonomy::new(Vec::new()).unwrap();
    /// let aggregator = Aggregator::new(&taxonomy, None);
    /// let first = aggregator.finalize();
    /// let second = aggregator.finalize();
    /// ```
    pub fn finalize(self) -> AnalysisResults {
        let categories = self
            .categories
            .into_iter()
            .map(|slot| CategoryStats {
                id: slot.id,
                name: slot.name,
                weight: slot.weight,
                stats: slot.totals.finalize(),
                subcategories: slot
                    .subcategories
                    .into_iter()
                    .map(|sub| SubcategoryStats {
                        id: sub.id,
                        name: sub.name,
                        stats: sub.totals.finalize(),
                    })
                    .collect(),
            })
            .collect();
        AnalysisResults { categories }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Normalized statistics of one accumulator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccumulatorStats {
    pub comment_count: u64,
    /// Mean raw rating.
    pub average_score: f64,
    /// Mean weighted, sentiment-adjusted score.
    pub satisfaction_score: f64,
    /// Retained comment samples in processing order.
    pub comments: Vec<RetainedComment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubcategoryStats {
    pub id: SubcategoryId,
    pub name: String,
    #[serde(flatten)]
    pub stats: AccumulatorStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub id: CategoryId,
    pub name: String,
    pub weight: f64,
    #[serde(flatten)]
    pub stats: AccumulatorStats,
    pub subcategories: Vec<SubcategoryStats>,
}

impl CategoryStats {
    pub fn subcategory(&self, id: &SubcategoryId) -> Option<&SubcategoryStats> {
        self.subcategories.iter().find(|s| &s.id == id)
    }
}

/// Finalized output of a run, in taxonomy order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResults {
    pub categories: Vec<CategoryStats>,
}

impl AnalysisResults {
    pub fn category(&self, id: &CategoryId) -> Option<&CategoryStats> {
        self.categories.iter().find(|c| &c.id == id)
    }
}
