//! # Taxonomy Index
//!
//! An immutable keyword lookup built once per run from a [`Taxonomy`]:
//! category → subcategory → keyword set. The categorizer walks it in
//! taxonomy order; direct lookups go through a position map.

use std::collections::HashMap;

use revlens_core::{CategoryId, SubcategoryId, Taxonomy};

/// Keywords of one subcategory.
#[derive(Debug, Clone)]
pub struct IndexedSubcategory {
    pub id: SubcategoryId,
    pub keywords: Vec<String>,
}

/// Subcategories of one category, in declaration order.
#[derive(Debug, Clone)]
pub struct IndexedCategory {
    pub id: CategoryId,
    pub subcategories: Vec<IndexedSubcategory>,
}

/// Keyword lookup structure derived from a taxonomy.
#[derive(Debug, Clone)]
pub struct TaxonomyIndex {
    categories: Vec<IndexedCategory>,
    positions: HashMap<CategoryId, usize>,
}

impl TaxonomyIndex {
    /// Build the index. Pure function of the taxonomy.
    pub fn build(taxonomy: &Taxonomy) -> Self {
        let categories: Vec<IndexedCategory> = taxonomy
            .categories()
            .iter()
            .map(|cat| IndexedCategory {
                id: cat.id().clone(),
                subcategories: cat
                    .subcategories()
                    .iter()
                    .map(|sub| IndexedSubcategory {
                        id: sub.id().clone(),
                        keywords: sub.keywords().iter().cloned().collect(),
                    })
                    .collect(),
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
        }
    }

    /// Categories in taxonomy order.
    pub fn categories(&self) -> &[IndexedCategory] {
        &self.categories
    }

    /// Keyword set of a (category, subcategory) pair.
    pub fn keywords(&self, category: &CategoryId, subcategory: &SubcategoryId) -> Option<&[String]> {
        let cat = &self.categories[*self.positions.get(category)?];
        cat.subcategories
            .iter()
            .find(|s| &s.id == subcategory)
            .map(|s| s.keywords.as_slice())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
