//! Logging configuration.
//!
//! Resolved in increasing precedence from:
//! - Built-in defaults
//! - The `[log]` table of the nodestat config file
//! - Environment variables (NS_LOG, RUST_LOG, NS_LOG_FORMAT)
//! - Explicit overrides passed by the embedding application

use serde::{Deserialize, Serialize};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable console format (default).
    #[default]
    Human,
    /// Machine-parseable JSON lines.
    Jsonl,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "console" | "pretty" => Ok(LogFormat::Human),
            "jsonl" | "json" | "structured" => Ok(LogFormat::Jsonl),
            _ => Err(format!("unknown log format: {}", s)),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Human => write!(f, "human"),
            LogFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// Log level filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    /// Completely silent.
    Off,
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" | "quiet" => Ok(LogLevel::Off),
            _ => Err(format!("unknown log level: {}", s)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Off => write!(f, "off"),
        }
    }
}

/// The `[log]` table of the config file. Unset fields defer to the
/// environment and built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: Option<LogLevel>,
    pub format: Option<LogFormat>,
    pub timestamps: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            level: None,
            format: None,
            timestamps: true,
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Whether to include timestamps in human output.
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Human,
            level: LogLevel::Info,
            timestamps: true,
        }
    }
}

impl LogConfig {
    /// Create config from the process environment and explicit overrides.
    pub fn from_env(level: Option<LogLevel>, format: Option<LogFormat>) -> Self {
        Self::resolve(&LogSettings::default(), level, format)
    }

    /// Layer file settings, environment and explicit overrides.
    pub fn resolve(
        settings: &LogSettings,
        level: Option<LogLevel>,
        format: Option<LogFormat>,
    ) -> Self {
        Self::resolve_with(settings, |key| std::env::var(key).ok(), level, format)
    }

    /// [`LogConfig::resolve`] with an injectable environment lookup.
    pub fn resolve_with(
        settings: &LogSettings,
        env: impl Fn(&str) -> Option<String>,
        level: Option<LogLevel>,
        format: Option<LogFormat>,
    ) -> Self {
        let mut config = LogConfig {
            format: settings.format.unwrap_or_default(),
            level: settings.level.unwrap_or_default(),
            timestamps: settings.timestamps,
        };

        // NS_LOG takes precedence over RUST_LOG
        if let Some(val) = env("NS_LOG") {
            if let Ok(level) = val.parse::<LogLevel>() {
                config.level = level;
            }
        } else if let Some(val) = env("RUST_LOG") {
            // Coarse match; the full directive still reaches EnvFilter.
            if val.contains("trace") {
                config.level = LogLevel::Trace;
            } else if val.contains("debug") {
                config.level = LogLevel::Debug;
            } else if val.contains("warn") {
                config.level = LogLevel::Warn;
            } else if val.contains("error") {
                config.level = LogLevel::Error;
            }
        }

        if let Some(val) = env("NS_LOG_FORMAT") {
            if let Ok(format) = val.parse::<LogFormat>() {
                config.format = format;
            }
        }

        if let Some(level) = level {
            config.level = level;
        }
        if let Some(format) = format {
            config.format = format;
        }

        config
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("human".parse::<LogFormat>().unwrap(), LogFormat::Human);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Jsonl);
        assert_eq!("JSONL".parse::<LogFormat>().unwrap(), LogFormat::Jsonl);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("quiet".parse::<LogLevel>().unwrap(), LogLevel::Off);
        assert_eq!(LogLevel::Debug.to_string(), "debug");
    }

    #[test]
    fn test_defaults_without_env() {
        let config = LogConfig::resolve_with(&LogSettings::default(), env_of(&[]), None, None);
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn test_ns_log_beats_rust_log() {
        let env = env_of(&[("NS_LOG", "debug"), ("RUST_LOG", "error")]);
        let config = LogConfig::resolve_with(&LogSettings::default(), env, None, None);
        assert_eq!(config.level, LogLevel::Debug);
    }

    #[test]
    fn test_rust_log_directive() {
        let env = env_of(&[("RUST_LOG", "ns_decode=trace")]);
        let config = LogConfig::resolve_with(&LogSettings::default(), env, None, None);
        assert_eq!(config.level, LogLevel::Trace);
    }

    #[test]
    fn test_precedence_chain() {
        let settings = LogSettings {
            level: Some(LogLevel::Warn),
            format: Some(LogFormat::Jsonl),
            timestamps: false,
        };

        let config = LogConfig::resolve_with(&settings, env_of(&[]), None, None);
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.format, LogFormat::Jsonl);
        assert!(!config.timestamps);

        let env = env_of(&[("NS_LOG_FORMAT", "human")]);
        let config = LogConfig::resolve_with(&settings, env, Some(LogLevel::Error), None);
        assert_eq!(config.level, LogLevel::Error);
        assert_eq!(config.format, LogFormat::Human);
    }
}
