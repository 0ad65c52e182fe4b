//! Nodestat: typed access to a geometry node's info report.
//!
//! A host hands over a node through [`ReportSource`]; [`SopInfo`] checks the
//! node produces geometry, captures one report snapshot, and exposes one
//! accessor per logical field (bounding box, memory, cook statistics,
//! timestamps, attribute tables, volumes, subnetwork outputs).
//!
//! ```ignore
//! use ns_core::{NodestatConfig, SopInfo};
//!
//! let info = SopInfo::new(&node, NodestatConfig::default())?;
//! for attr in info.point_attributes()? {
//!     println!("{}", attr);
//! }
//! ```

pub mod config;
pub mod host;
pub mod logging;
pub mod sop_info;

pub use config::NodestatConfig;
pub use host::{NodeCategory, NodeIdentity, NodeResolver, ReportSource};
pub use sop_info::{BoundingBox, SopInfo, SopSummary};

pub use ns_common::{Error, ErrorCategory, ReportNode, Result};
