// Parser safety limits module
//
// Provides configurable resource limits to prevent:
// - Stack overflow from deeply nested map expressions and patterns
// - Memory exhaustion from very large source files
//
// All limits have permissive defaults and can be overridden via project.toml

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Deepest nesting `validate` accepts. The parser recurses once per level, and
/// this many levels fit on a 2 MB thread stack in debug builds.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Parser safety limits with permissive defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserLimits {
    // Lexer limits
    pub max_input_size: usize,  // Maximum source size in bytes
    pub max_token_count: usize, // Maximum number of tokens per source

    // Parser limits
    pub max_nesting_depth: usize, // Maximum recursion depth of nested expressions
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self {
            max_input_size: 10_000_000, // 10 MB
            max_token_count: 100_000,
            max_nesting_depth: 256,
        }
    }
}

impl ParserLimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load limits from project.toml, falling back to defaults
    ///
    /// Returns error only if the file is unreadable, the TOML is malformed or a
    /// limit is out of range, not if the file is missing
    pub fn from_project_toml<P: AsRef<Path>>(path: P) -> Result<Self, LimitError> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| LimitError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let limits = Self::from_toml_str(&content).map_err(|err| match err {
            LimitError::Parse { source, .. } => LimitError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        Ok(limits)
    }

    /// Parse limits from TOML text; only keys present in `[limits]` override defaults
    pub fn from_toml_str(content: &str) -> Result<Self, LimitError> {
        let config: ProjectConfig = toml::from_str(content).map_err(|source| LimitError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;

        let mut limits = Self::default();

        if let Some(limits_config) = config.limits {
            if let Some(v) = limits_config.max_input_size {
                limits.max_input_size = v;
            }
            if let Some(v) = limits_config.max_token_count {
                limits.max_token_count = v;
            }
            if let Some(v) = limits_config.max_nesting_depth {
                limits.max_nesting_depth = v;
            }
        }

        limits.validate()?;
        Ok(limits)
    }

    /// Validate that all limits are reasonable (positive, not absurdly large)
    pub fn validate(&self) -> Result<(), LimitError> {
        const MAX_REASONABLE: usize = 100_000_000; // 100 MB

        if self.max_input_size == 0 || self.max_input_size > MAX_REASONABLE {
            return Err(LimitError::invalid("max_input_size", self.max_input_size));
        }

        if self.max_token_count == 0 {
            return Err(LimitError::invalid("max_token_count", self.max_token_count));
        }

        if self.max_nesting_depth == 0 || self.max_nesting_depth > MAX_NESTING_DEPTH {
            return Err(LimitError::invalid(
                "max_nesting_depth",
                self.max_nesting_depth,
            ));
        }

        Ok(())
    }
}

/// TOML configuration structures for deserialization
#[derive(Debug, Deserialize)]
struct ProjectConfig {
    limits: Option<LimitsConfig>,
}

#[derive(Debug, Deserialize)]
struct LimitsConfig {
    max_input_size: Option<usize>,
    max_token_count: Option<usize>,
    max_nesting_depth: Option<usize>,
}

/// Error type for limit validation and loading
#[derive(Debug, Error)]
pub enum LimitError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid limit '{name}': {value} (must be positive and reasonable)")]
    Invalid { name: &'static str, value: usize },
}

impl LimitError {
    fn invalid(name: &'static str, value: usize) -> Self {
        Self::Invalid { name, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_are_reasonable() {
        let limits = ParserLimits::default();
        assert!(limits.validate().is_ok());
        assert_eq!(limits, ParserLimits::new());
    }

    #[test]
    fn test_default_values() {
        let limits = ParserLimits::default();
        assert_eq!(limits.max_input_size, 10_000_000);
        assert_eq!(limits.max_token_count, 100_000);
        assert_eq!(limits.max_nesting_depth, 256);
    }

    #[test]
    fn test_validation_catches_zero_values() {
        let mut limits = ParserLimits::default();
        limits.max_input_size = 0;
        assert!(limits.validate().is_err());

        limits = ParserLimits::default();
        limits.max_token_count = 0;
        assert!(limits.validate().is_err());

        limits = ParserLimits::default();
        limits.max_nesting_depth = 0;
        assert!(limits.validate().is_err());
    }

    #[test]
    fn test_validation_catches_too_large_values() {
        let mut limits = ParserLimits::default();
        limits.max_input_size = 200_000_000;
        assert!(limits.validate().is_err());

        limits = ParserLimits::default();
        limits.max_nesting_depth = MAX_NESTING_DEPTH + 1;
        assert!(matches!(
            limits.validate(),
            Err(LimitError::Invalid {
                name: "max_nesting_depth",
                value: 513
            })
        ));

        limits.max_nesting_depth = MAX_NESTING_DEPTH;
        assert!(limits.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let limits = ParserLimits::from_project_toml("nonexistent-project.toml").unwrap();
        assert_eq!(limits, ParserLimits::default());
    }

    #[test]
    fn test_partial_override() {
        let toml_content = r#"
[limits]
max_input_size = 2000000
max_nesting_depth = 128
"#;
        let temp_path = std::env::temp_dir().join("flow_lang_test_limits.toml");
        fs::write(&temp_path, toml_content).unwrap();

        let limits = ParserLimits::from_project_toml(&temp_path).unwrap();
        assert_eq!(limits.max_input_size, 2_000_000); // Overridden
        assert_eq!(limits.max_nesting_depth, 128); // Overridden
        assert_eq!(limits.max_token_count, 100_000); // Default

        fs::remove_file(&temp_path).ok();
    }

    #[test]
    fn test_missing_limits_table_uses_defaults() {
        let limits = ParserLimits::from_toml_str("[package]\nname = \"pipelines\"\n").unwrap();
        assert_eq!(limits, ParserLimits::default());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let err = ParserLimits::from_toml_str("[limits\nmax_input_size = ").unwrap_err();
        assert!(matches!(err, LimitError::Parse { .. }));
    }

    #[test]
    fn test_out_of_range_override_is_rejected() {
        let err = ParserLimits::from_toml_str("[limits]\nmax_token_count = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_token_count"));
    }
}
