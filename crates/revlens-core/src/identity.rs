//! # Identity Newtypes
//!
//! Stable keys for taxonomy nodes. A [`CategoryId`] cannot be passed where
//! a [`SubcategoryId`] is expected, and neither can be empty.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Stable key of a top-level category (e.g. `game_mechanics`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryId(String);

impl CategoryId {
    /// Create a category identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyIdentifier`] for an empty or
    /// whitespace-only value.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() {
            return Err(ValidationError::EmptyIdentifier { kind: "category" });
        }
        Ok(Self(s))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CategoryId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CategoryId> for String {
    fn from(id: CategoryId) -> Self {
        id.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable key of a subcategory, unique within its parent category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubcategoryId(String);

impl SubcategoryId {
    /// Create a subcategory identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyIdentifier`] for an empty or
    /// whitespace-only value.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() {
            return Err(ValidationError::EmptyIdentifier {
                kind: "subcategory",
            });
        }
        Ok(Self(s))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SubcategoryId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SubcategoryId> for String {
    fn from(id: SubcategoryId) -> Self {
        id.0
    }
}

impl std::fmt::Display for SubcategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_id_rejects_blank() {
        assert!(CategoryId::new("").is_err());
        assert!(CategoryId::new("   ").is_err());
        assert_eq!(CategoryId::new("mechanics").unwrap().as_str(), "mechanics");
    }

    #[test]
    fn subcategory_id_error_names_kind() {
        let err = SubcategoryId::new("").unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyIdentifier {
                kind: "subcategory"
            }
        );
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let ok: CategoryId = serde_json::from_str("\"gacha\"").unwrap();
        assert_eq!(ok.to_string(), "gacha");
        assert!(serde_json::from_str::<CategoryId>("\"\"").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = SubcategoryId::new("combat").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"combat\"");
    }
}
