//! Nodestat common types and errors.
//!
//! This crate provides the foundation shared by the decoding crates:
//! - The report tree model a host hands over for a node
//! - Fixed section names of the geometry node info report
//! - The unified error type with stable codes

pub mod error;
pub mod report;
pub mod sections;

pub use error::{Error, ErrorCategory, Result};
pub use report::{ReportNode, Row};
