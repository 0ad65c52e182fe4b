//! Report tree model.
//!
//! A host describes a node as a tree of named sections. Each section holds
//! an ordered table of string rows and any number of nested sections:
//!
//! ```text
//! SOP Info
//! ├── rows: ("Center", "(0, 0.5, 0)"), ("Memory", "12.41 KB"), ...
//! ├── Counts
//! ├── Point Attributes
//! └── Volumes
//! General Info
//! └── Operator Info
//! ```
//!
//! No validation happens here. Row arity and cell content are checked by the
//! decoder that consumes a given table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One table row. Arity is fixed per table type but not enforced here.
pub type Row = Vec<String>;

/// A section of the report: ordered rows plus named child sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportNode {
    /// Table rows in host order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<Row>,
    /// Child sections keyed by exact name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub branches: BTreeMap<String, ReportNode>,
}

impl ReportNode {
    /// Create an empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row.
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Insert (or replace) a named child section.
    pub fn with_branch(mut self, name: impl Into<String>, node: ReportNode) -> Self {
        self.branches.insert(name.into(), node);
        self
    }

    /// Rows in host order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Look up a child section by exact name.
    ///
    /// # Errors
    /// Returns [`Error::SectionNotFound`] if no such child exists.
    pub fn branch(&self, name: &str) -> Result<&ReportNode> {
        self.branches.get(name).ok_or_else(|| Error::SectionNotFound {
            section: name.to_string(),
        })
    }

    /// Look up a child section, `None` when absent.
    pub fn try_branch(&self, name: &str) -> Option<&ReportNode> {
        self.branches.get(name)
    }

    /// Walk a path of section names from this node.
    ///
    /// The error names the first missing section on the path.
    pub fn branch_at(&self, path: &[&str]) -> Result<&ReportNode> {
        path.iter().try_fold(self, |node, name| node.branch(name))
    }

    /// Child section names in sorted order.
    pub fn branch_names(&self) -> impl Iterator<Item = &str> {
        self.branches.keys().map(String::as_str)
    }

    /// True when the section has neither rows nor children.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.branches.is_empty()
    }

    /// Parse a report snapshot captured as JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the snapshot to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
