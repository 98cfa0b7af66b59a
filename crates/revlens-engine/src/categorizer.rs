//! # Categorizer
//!
//! A subcategory matches a review when any of its keywords is a substring
//! of the raw content or equals one of the review's token surfaces. The two
//! checks are OR-ed: the substring check alone is sufficient, the token
//! check only ever adds matches.
//!
//! A category appears in the result only if at least one of its
//! subcategories matched. Output follows taxonomy order.

use std::collections::HashSet;

use serde::Serialize;

use revlens_core::{CategoryId, SubcategoryId};

use crate::index::TaxonomyIndex;

/// The subcategories of one category that matched a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryMatch {
    pub category: CategoryId,
    /// Never empty; in taxonomy order.
    pub subcategories: Vec<SubcategoryId>,
}

/// All categories a review belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Categorization {
    matches: Vec<CategoryMatch>,
}

impl Categorization {
    pub fn new(matches: Vec<CategoryMatch>) -> Self {
        Self { matches }
    }

    pub fn matches(&self) -> &[CategoryMatch] {
        &self.matches
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Matched subcategories of `category`, if the category matched.
    pub fn get(&self, category: &CategoryId) -> Option<&[SubcategoryId]> {
        self.matches
            .iter()
            .find(|m| &m.category == category)
            .map(|m| m.subcategories.as_slice())
    }
}

/// Categorize one review.
pub fn categorize(content: &str, token_surfaces: &[String], index: &TaxonomyIndex) -> Categorization {
    let tokens: HashSet<&str> = token_surfaces.iter().map(String::as_str).collect();

    let matches = index
        .categories()
        .iter()
        .filter_map(|cat| {
            let subcategories: Vec<SubcategoryId> = cat
                .subcategories
                .iter()
                .filter(|sub| keywords_match(content, &tokens, &sub.keywords))
                .map(|sub| sub.id.clone())
                .collect();
            (!subcategories.is_empty()).then(|| CategoryMatch {
                category: cat.id.clone(),
                subcategories,
            })
        })
        .collect();

    Categorization { matches }
}

fn keywords_match(content: &str, tokens: &HashSet<&str>, keywords: &[String]) -> bool {
    keywords.iter().any(|k| content.contains(k.as_str()))
        || keywords.iter().any(|k| tokens.contains(k.as_str()))
}
