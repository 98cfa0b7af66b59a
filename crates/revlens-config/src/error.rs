//! Configuration error types.
//!
//! Every variant carries enough context (file path, YAML path) to locate the
//! offending entry without re-reading the file.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a taxonomy configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The file is not valid YAML.
    #[error("failed to parse YAML at {path}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// A required top-level section is absent or null.
    #[error("configuration is missing required section `{section}`")]
    MissingSection { section: &'static str },

    /// Well-formed YAML whose top-level sections have the wrong shape.
    #[error("configuration has the wrong structure: {detail}")]
    InvalidStructure { detail: String },

    /// A category or subcategory entry is malformed.
    #[error("invalid entry at {path}: {detail}")]
    InvalidCategory { path: String, detail: String },

    /// A domain value failed validation (empty id, bad weight, duplicate).
    #[error("validation error: {0}")]
    Validation(#[from] revlens_core::ValidationError),

    /// Generic YAML error, not tied to a file.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// True if the document could not be parsed as YAML at all.
    ///
    /// This is the only failure for which a caller may choose to fall back
    /// to the built-in taxonomy; structural errors in a well-formed file are
    /// always reported.
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, ConfigError::YamlParse { .. } | ConfigError::Yaml(_))
    }
}

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_display() {
        let err = ConfigError::FileNotFound {
            path: PathBuf::from("/tmp/missing.yaml"),
        };
        assert!(err.to_string().contains("/tmp/missing.yaml"));
        assert!(!err.is_syntax_error());
    }

    #[test]
    fn missing_section_display() {
        let err = ConfigError::MissingSection {
            section: "categories",
        };
        assert_eq!(
            err.to_string(),
            "configuration is missing required section `categories`"
        );
    }

    #[test]
    fn yaml_error_is_syntax_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [b").unwrap_err();
        assert!(ConfigError::from(yaml_err).is_syntax_error());
    }

    #[test]
    fn parse_error_message_is_not_repeated() {
        use std::error::Error as _;

        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [b").unwrap_err();
        let detail = yaml_err.to_string();
        let err = ConfigError::YamlParse {
            path: PathBuf::from("categories.yaml"),
            source: yaml_err,
        };
        assert_eq!(err.to_string(), "failed to parse YAML at categories.yaml");
        assert_eq!(err.source().map(|s| s.to_string()), Some(detail.clone()));

        let chain = format!("{:#}", anyhow::Error::from(err));
        assert_eq!(chain.matches(detail.as_str()).count(), 1);
    }

    #[test]
    fn validation_error_converts() {
        let err = ConfigError::from(revlens_core::ValidationError::DuplicateCategory(
            "gacha".into(),
        ));
        assert!(err.to_string().contains("gacha"));
    }
}
