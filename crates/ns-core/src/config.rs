//! Nodestat configuration.
//!
//! Every field has a default, so an empty file (or no file) reproduces the
//! behavior observed from the host tooling. Example:
//!
//! ```toml
//! date_format = "%d %b %Y %I:%M %p"
//!
//! [units]
//! ms_to_seconds = 0.001
//! kb_to_megabytes = 0.001
//!
//! [log]
//! level = "debug"
//! format = "jsonl"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use ns_common::{Error, Result};
use ns_decode::{UnitScales, DEFAULT_DATE_FORMAT};

use crate::logging::LogSettings;

/// Decoding and logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodestatConfig {
    /// Unit conversion factors for durations and sizes.
    pub units: UnitScales,
    /// chrono format string for `Created Time` / `Modified Time`.
    pub date_format: String,
    pub log: LogSettings,
}

impl Default for NodestatConfig {
    fn default() -> Self {
        NodestatConfig {
            units: UnitScales::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            log: LogSettings::default(),
        }
    }
}

impl NodestatConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: NodestatConfig =
            toml::from_str(toml).map_err(|e| Error::Config(format!("invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Check semantic constraints serde cannot express.
    ///
    /// # Errors
    /// [`Error::Config`] for a non-positive or non-finite scale factor, or
    /// an empty date format.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("units.ms_to_seconds", self.units.ms_to_seconds),
            ("units.kb_to_megabytes", self.units.kb_to_megabytes),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a positive number, got {}",
                    field, value
                )));
            }
        }
        if self.date_format.trim().is_empty() {
            return Err(Error::Config("date_format must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn with_units(mut self, units: UnitScales) -> Self {
        self.units = units;
        self
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogFormat, LogLevel};

    #[test]
    fn test_empty_document_is_default() {
        let config = NodestatConfig::from_toml_str("").unwrap();
        assert_eq!(config, NodestatConfig::default());
        assert_eq!(config.units.ms_to_seconds, 0.01);
        assert_eq!(config.date_format, "%d %b %Y %I:%M %p");
    }

    #[test]
    fn test_partial_override() {
        let config = NodestatConfig::from_toml_str(
            r#"
            [units]
            ms_to_seconds = 0.001

            [log]
            level = "debug"
            format = "jsonl"
            "#,
        )
        .unwrap();
        assert_eq!(config.units.ms_to_seconds, 0.001);
        assert_eq!(config.units.kb_to_megabytes, 0.001);
        assert_eq!(config.log.level, Some(LogLevel::Debug));
        assert_eq!(config.log.format, Some(LogFormat::Jsonl));
        assert!(config.log.timestamps);
    }

    #[test]
    fn test_rejects_bad_scales() {
        let err = NodestatConfig::from_toml_str("[units]\nms_to_seconds = 0.0").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("ms_to_seconds"));

        let err = NodestatConfig::from_toml_str("[units]\nkb_to_megabytes = -1.0").unwrap_err();
        assert!(err.to_string().contains("kb_to_megabytes"));
    }

    #[test]
    fn test_rejects_empty_date_format() {
        let err = NodestatConfig::from_toml_str("date_format = \"  \"").unwrap_err();
        assert_eq!(err.code(), 10);
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = NodestatConfig::from_toml_str("units = 3").unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn test_missing_file() {
        let err = NodestatConfig::from_file(Path::new("/nonexistent/nodestat.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
