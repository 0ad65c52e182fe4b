//! Host capability interfaces.
//!
//! The scene graph lives outside this crate. A host integration supplies two
//! things: a [`ReportSource`] that identifies a node and captures its info
//! report, and a [`NodeResolver`] that turns a path relative to that node
//! into whatever handle the host uses for nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use ns_common::{ReportNode, Result};

/// Operator family of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    /// Geometry-producing (SOP) node.
    Sop,
    Object,
    Dop,
    Lop,
    Top,
    Other(String),
}

impl NodeCategory {
    /// Whether nodes of this category produce geometry and so carry a
    /// `SOP Info` report.
    pub fn is_geometry(&self) -> bool {
        matches!(self, NodeCategory::Sop)
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeCategory::Sop => write!(f, "sop"),
            NodeCategory::Object => write!(f, "object"),
            NodeCategory::Dop => write!(f, "dop"),
            NodeCategory::Lop => write!(f, "lop"),
            NodeCategory::Top => write!(f, "top"),
            NodeCategory::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Who a report is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeIdentity {
    /// Full path, e.g. `/obj/geo1/subnet1`.
    pub path: String,
    /// Node name, the last path component.
    pub name: String,
    pub category: NodeCategory,
}

impl NodeIdentity {
    /// Identity from a full path; the name is its last component.
    pub fn from_path(path: impl Into<String>, category: NodeCategory) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        NodeIdentity {
            path,
            name,
            category,
        }
    }
}

/// A node that can describe itself and capture its info report.
pub trait ReportSource {
    fn identity(&self) -> NodeIdentity;

    /// Capture the node's current info report.
    ///
    /// Hosts should map their own failures to [`ns_common::Error::Report`].
    fn snapshot(&self) -> Result<ReportNode>;
}

/// Resolves a path relative to a node into a host handle.
pub trait NodeResolver {
    type Handle;

    fn resolve(&self, relative_path: &str) -> Option<Self::Handle>;
}

impl<F, H> NodeResolver for F
where
    F: Fn(&str) -> Option<H>,
{
    type Handle = H;

    fn resolve(&self, relative_path: &str) -> Option<H> {
        self(relative_path)
    }
}
