//! Section names of the geometry node info report.
//!
//! Names are matched exactly (case-sensitive) against report branches.

/// Top-level geometry summary: bounding box, memory, plus the element tables.
pub const SOP_INFO: &str = "SOP Info";
/// Cook statistics, timestamps, contained node count.
pub const GENERAL_INFO: &str = "General Info";
/// Nested under [`GENERAL_INFO`]: operator version.
pub const OPERATOR_INFO: &str = "Operator Info";
/// Nested under [`GENERAL_INFO`]: asset authoring info.
pub const SCRIPT_OPERATOR_INFO: &str = "Script Operator Info";
/// Time dependency flags.
pub const DEPENDENCY: &str = "Dependency";
/// Output index to internal node path.
pub const SUBNETWORK_SOP_INFO: &str = "Subnetwork SOP Info";

/// Nested under [`SOP_INFO`]: per-element counts.
pub const COUNTS: &str = "Counts";
/// Nested under [`SOP_INFO`].
pub const DETAIL_ATTRIBUTES: &str = "Detail Attributes";
/// Nested under [`SOP_INFO`].
pub const POINT_ATTRIBUTES: &str = "Point Attributes";
/// Nested under [`SOP_INFO`].
pub const VERTEX_ATTRIBUTES: &str = "Vertex Attributes";
/// Nested under [`SOP_INFO`].
pub const PRIMITIVE_ATTRIBUTES: &str = "Primitive Attributes";
/// Nested under [`SOP_INFO`]: dense volume primitives.
pub const VOLUMES: &str = "Volumes";
/// Nested under [`SOP_INFO`]: sparse (VDB) volume primitives.
pub const SPARSE_VOLUMES: &str = "Sparse Volumes";

/// Field keys read from the key/value tables.
pub mod fields {
    pub const CENTER: &str = "Center";
    pub const MINIMUM: &str = "Minimum";
    pub const MAXIMUM: &str = "Maximum";
    pub const MEMORY: &str = "Memory";

    pub const CONTAINED_NODES: &str = "Contained Nodes";
    pub const SYNCHRONIZED_WITH_DEFINITION: &str = "Synchronized with Definition";
    pub const LAST_COOK_TIME: &str = "Last Cook Time";
    pub const TOTAL_COOKS: &str = "Total Cooks";
    pub const CREATED_TIME: &str = "Created Time";
    pub const MODIFIED_TIME: &str = "Modified Time";

    pub const VERSION: &str = "Version";
    pub const DEFINED_BY: &str = "Defined By";
    pub const TIME_DEPENDENT: &str = "Time Dependent";

    pub const POINTS: &str = "Points";
    pub const PRIMITIVES: &str = "Primitives";
    pub const VERTICES: &str = "Vertices";
    pub const VOLUMES: &str = "Volumes";
    pub const VDBS: &str = "VDBs";
    pub const PACKED_GEOMETRIES: &str = "Packed Geometries";
    pub const PACKED_FRAGMENTS: &str = "Packed Fragments";
}
