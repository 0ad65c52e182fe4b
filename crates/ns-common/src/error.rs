//! Error types for Nodestat.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - A short headline for human-facing output
//!
//! Section lookups that fail with [`Error::SectionNotFound`] are an expected
//! outcome: most reports omit tables that do not apply to the geometry
//! (volumes, subnetwork outputs, ...). Accessors translate that case into an
//! empty default; every other variant is surfaced to the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for Nodestat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Configuration values (unit scales, date format).
    Config,
    /// Report tree shape: missing sections, bad row arity.
    Report,
    /// Field and table decoding.
    Decode,
    /// Host collaborator failures and node capability checks.
    Host,
    /// Snapshot serialization.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Report => write!(f, "report"),
            ErrorCategory::Decode => write!(f, "decode"),
            ErrorCategory::Host => write!(f, "host"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for Nodestat.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    // Report tree errors (20-29)
    #[error("section not found: {section}")]
    SectionNotFound { section: String },

    #[error("table '{table}' row {row}: expected {expected} columns, got {actual}")]
    RowArity {
        table: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    // Decode errors (30-39)
    #[error("malformed {context}: {message}")]
    Format { context: String, message: String },

    #[error("{context}: expected {expected}, got {actual}")]
    Shape {
        context: String,
        expected: String,
        actual: String,
    },

    #[error("required field '{field}' missing from section '{section}'")]
    MissingField { section: String, field: String },

    /// Format error of the token path: a pre-split token sequence that does
    /// not reduce to a number or a tuple of numbers.
    #[error("expression '{input}' rejected: {message}")]
    Expression { input: String, message: String },

    // Host errors (40-49)
    #[error("node {path} is a {category} node, expected a geometry node")]
    InvalidNode { path: String, category: String },

    #[error("subnetwork output '{path}' could not be resolved")]
    UnresolvedPath { path: String },

    #[error("host failed to produce a report: {0}")]
    Report(String),

    // I/O errors (60-69)
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a [`Error::Format`] error.
    pub fn format(context: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Format {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::Shape`] error.
    pub fn shape(
        context: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Error::Shape {
            context: context.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Report tree errors
    /// - 30-39: Decode errors
    /// - 40-49: Host errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::SectionNotFound { .. } => 20,
            Error::RowArity { .. } => 21,
            Error::Format { .. } => 30,
            Error::Shape { .. } => 31,
            Error::MissingField { .. } => 32,
            Error::Expression { .. } => 33,
            Error::InvalidNode { .. } => 40,
            Error::UnresolvedPath { .. } => 41,
            Error::Report(_) => 42,
            Error::Json(_) => 60,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) => ErrorCategory::Config,
            Error::SectionNotFound { .. } | Error::RowArity { .. } => ErrorCategory::Report,
            Error::Format { .. }
            | Error::Shape { .. }
            | Error::MissingField { .. }
            | Error::Expression { .. } => ErrorCategory::Decode,
            Error::InvalidNode { .. } | Error::UnresolvedPath { .. } | Error::Report(_) => {
                ErrorCategory::Host
            }
            Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Whether this error is an anticipated condition rather than a fault.
    ///
    /// Only a missing section qualifies; accessors map it to a default.
    pub fn is_expected(&self) -> bool {
        matches!(self, Error::SectionNotFound { .. })
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::SectionNotFound { .. } => "Section Not Found",
            Error::RowArity { .. } => "Table Shape Mismatch",
            Error::Format { .. } => "Malformed Value",
            Error::Shape { .. } => "Unexpected Value Shape",
            Error::MissingField { .. } => "Missing Required Field",
            Error::Expression { .. } => "Rejected Expression",
            Error::InvalidNode { .. } => "Invalid Node Type",
            Error::UnresolvedPath { .. } => "Unresolved Node Path",
            Error::Report(_) => "Report Unavailable",
            Error::Json(_) => "JSON Parse Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(Error::Config("test".into()).code(), 10);
        assert_eq!(
            Error::SectionNotFound {
                section: "Volumes".into()
            }
            .code(),
            20
        );
        assert_eq!(Error::format("duration", "bad unit").code(), 30);
        assert_eq!(Error::Report("gone".into()).code(), 42);
    }

    #[test]
    fn test_error_category() {
        assert_eq!(Error::Config("x".into()).category(), ErrorCategory::Config);
        assert_eq!(
            Error::RowArity {
                table: "Volumes".into(),
                row: 0,
                expected: 6,
                actual: 5
            }
            .category(),
            ErrorCategory::Report
        );
        assert_eq!(
            Error::shape("vector3", "3 components", "2").category(),
            ErrorCategory::Decode
        );
        assert_eq!(
            Error::InvalidNode {
                path: "/obj/cam1".into(),
                category: "object".into()
            }
            .category(),
            ErrorCategory::Host
        );
    }

    #[test]
    fn test_only_missing_section_is_expected() {
        assert!(Error::SectionNotFound {
            section: "Sparse Volumes".into()
        }
        .is_expected());
        assert!(!Error::MissingField {
            section: "General Info".into(),
            field: "Created Time".into()
        }
        .is_expected());
    }

    #[test]
    fn test_row_arity_message_names_table() {
        let err = Error::RowArity {
            table: "Point Attributes".into(),
            row: 3,
            expected: 7,
            actual: 6,
        };
        let msg = err.to_string();
        assert!(msg.contains("Point Attributes"));
        assert!(msg.contains("expected 7"));
        assert_eq!(err.headline(), "Table Shape Mismatch");
    }

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Decode.to_string(), "decode");
        assert_eq!(ErrorCategory::Host.to_string(), "host");
    }
}
