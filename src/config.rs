//! Namespace configuration
//!
//! Loaded from JSON. Every field is optional:
//!
//! ```json
//! { "log_level": "INFO", "memoize_generators": false }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{AliasError, AliasResult};
use crate::observability::{Event, Logger, Severity};

/// Configuration for a namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamespaceConfig {
    /// Minimum severity a namespace logs (default: INFO)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,

    /// Cache type function results by argument identity (default: false)
    #[serde(default)]
    pub memoize_generators: bool,
}

fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            memoize_generators: false,
        }
    }
}

impl NamespaceConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> AliasResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AliasError::invalid_config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = Self::from_json_str(&content)?;
        let path = path.display().to_string();
        Logger::event(
            config.log_level,
            Event::ConfigLoaded,
            &[
                ("log_level", config.log_level.as_str()),
                ("path", path.as_str()),
            ],
        );

        Ok(config)
    }

    /// Parse configuration from JSON text
    pub fn from_json_str(content: &str) -> AliasResult<Self> {
        let config: NamespaceConfig = serde_json::from_str(content)
            .map_err(|e| AliasError::invalid_config(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Nothing in a namespace is ever fatal, so a FATAL threshold would
    /// silence every event including failures.
    pub fn validate(&self) -> AliasResult<()> {
        if self.log_level == Severity::Fatal {
            return Err(AliasError::invalid_config(
                "log_level FATAL would suppress every event",
            ));
        }
        Ok(())
    }

    /// Config with generator memoization enabled
    pub fn memoized() -> Self {
        Self {
            memoize_generators: true,
            ..Default::default()
        }
    }

    /// Config that only logs failures
    pub fn quiet() -> Self {
        Self {
            log_level: Severity::Error,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = NamespaceConfig::default();
        assert_eq!(config.log_level, Severity::Info);
        assert!(!config.memoize_generators);
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = NamespaceConfig::from_json_str("{}").unwrap();
        assert_eq!(config, NamespaceConfig::default());
    }

    #[test]
    fn test_parse_all_fields() {
        let config =
            NamespaceConfig::from_json_str(r#"{"log_level":"TRACE","memoize_generators":true}"#)
                .unwrap();
        assert_eq!(config.log_level, Severity::Trace);
        assert!(config.memoize_generators);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = NamespaceConfig::from_json_str(r#"{"memoise":true}"#).unwrap_err();
        assert_eq!(err.code(), "TYPE_INVALID_CONFIG");
    }

    #[test]
    fn test_fatal_level_rejected() {
        let err = NamespaceConfig::from_json_str(r#"{"log_level":"FATAL"}"#).unwrap_err();
        assert!(err.to_string().contains("FATAL"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"log_level":"WARN"}}"#).unwrap();

        let config = NamespaceConfig::load(file.path()).unwrap();
        assert_eq!(config.log_level, Severity::Warn);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = NamespaceConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.code(), "TYPE_INVALID_CONFIG");
        assert!(!err.is_declaration_error());
    }

    #[test]
    fn test_presets() {
        assert!(NamespaceConfig::memoized().memoize_generators);
        assert_eq!(NamespaceConfig::quiet().log_level, Severity::Error);
    }
}
