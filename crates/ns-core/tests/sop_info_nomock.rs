//! No-mock integration tests for the `SopInfo` facade.
//!
//! These tests decode a real captured report snapshot (JSON fixture) and
//! cover:
//! - Every scalar accessor and unit conversion
//! - Attribute, volume and counts tables
//! - Subnetwork output resolution against a scene-graph lookup
//! - Configuration overrides flowing into the unit decoders

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use ns_core::{
    Error, NodeCategory, NodeIdentity, NodeResolver, NodestatConfig, ReportNode, ReportSource,
    Result, SopInfo,
};
use ns_decode::{ScalarValue, UnitScales, Vector3};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// A node whose report comes from a captured snapshot file.
struct CapturedNode {
    path: &'static str,
    category: NodeCategory,
    fixture: &'static str,
}

impl ReportSource for CapturedNode {
    fn identity(&self) -> NodeIdentity {
        NodeIdentity::from_path(self.path, self.category.clone())
    }

    fn snapshot(&self) -> Result<ReportNode> {
        let content = fs::read_to_string(fixture_path(self.fixture))
            .map_err(|e| Error::Report(format!("{}: {}", self.fixture, e)))?;
        ReportNode::from_json(&content)
    }
}

/// Children of the subnetwork, keyed by path relative to it.
struct SceneGraph {
    nodes: HashMap<&'static str, &'static str>,
}

impl NodeResolver for SceneGraph {
    type Handle = String;

    fn resolve(&self, relative_path: &str) -> Option<String> {
        self.nodes
            .get(relative_path)
            .map(|path| path.to_string())
    }
}

fn subnet() -> CapturedNode {
    CapturedNode {
        path: "/obj/geo1/geo_subnet",
        category: NodeCategory::Sop,
        fixture: "subnet_report.json",
    }
}

fn load() -> SopInfo {
    SopInfo::new(&subnet(), NodestatConfig::default()).expect("fixture should load")
}

macro_rules! log_test {
    ($level:expr, $msg:expr $(,)?) => {{
        eprintln!("[{}] {}", $level, $msg);
    }};
}

// ============================================================================
// Scalar fields
// ============================================================================

#[test]
fn test_bounding_box_from_fixture() {
    let info = load();
    let bbox = info.bounding_box().unwrap();
    // Center arrives split over several cells.
    assert_eq!(bbox.center, Some(Vector3::new(0.0, 0.5, 0.0)));
    assert_eq!(bbox.minimum, Some(Vector3::new(-0.5, 0.0, -0.5)));
    assert_eq!(bbox.maximum, Some(Vector3::new(0.5, 1.0, 0.5)));
}

#[test]
fn test_general_info_from_fixture() {
    let info = load();
    assert_eq!(info.contained_nodes().unwrap(), Some(5));
    assert_eq!(info.synchronized_with_definition().unwrap(), Some(false));
    assert_eq!(info.total_cooks().unwrap(), Some(12));
    assert!((info.last_cook_time().unwrap() - 0.84).abs() < 1e-12);
    assert_eq!(info.time_dependent().unwrap(), Some(true));
    assert_eq!(info.version().unwrap(), ScalarValue::from("2.1"));
    assert_eq!(
        info.defined_by().unwrap(),
        ScalarValue::from("/opt/hfs/houdini/otls/OPlibSop.hda")
    );
}

#[test]
fn test_timestamps_from_fixture() {
    let info = load();
    let created = NaiveDate::from_ymd_opt(2019, 3, 14)
        .and_then(|d| d.and_hms_opt(9, 26, 0))
        .unwrap();
    let modified = NaiveDate::from_ymd_opt(2019, 4, 2)
        .and_then(|d| d.and_hms_opt(16, 5, 0))
        .unwrap();
    assert_eq!(info.created_time().unwrap(), created);
    assert_eq!(info.modified_time().unwrap(), modified);
}

#[test]
fn test_memory_from_fixture() {
    let info = load();
    assert_eq!(info.memory().unwrap(), ScalarValue::from("12.41 KB true"));
    let megabytes = info.memory_megabytes().unwrap().unwrap();
    assert!((megabytes - 0.01241).abs() < 1e-12, "got {}", megabytes);
}

// ============================================================================
// Tables
// ============================================================================

#[test]
fn test_attribute_tables_from_fixture() {
    let info = load();
    let labels = |attrs: Vec<ns_decode::AttributeDescriptor>| -> Vec<String> {
        attrs.iter().map(|a| a.label()).collect()
    };

    assert_eq!(
        labels(info.point_attributes().unwrap()),
        vec!["Cd 3flt (Clr)", "N 3flt (Nml)", "P 3flt (Pos)"]
    );
    assert_eq!(labels(info.detail_attributes().unwrap()), vec!["varmap str[]"]);
    assert_eq!(labels(info.vertex_attributes().unwrap()), vec!["uv 3flt (Tex)"]);
    assert_eq!(
        labels(info.primitive_attributes().unwrap()),
        vec!["name str (2 unique)", "transform 9flt (Matrix)"]
    );
}

#[test]
fn test_volume_tables_from_fixture() {
    let info = load();

    let volumes = info.volumes().unwrap();
    let names: Vec<&str> = volumes.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["density", "vel.y"]);
    assert_eq!(volumes[0].resolution, [10, 20, 10]);
    assert_eq!(volumes[0].voxel_count_label, "Voxels: 2000");

    let sparse = info.sparse_volumes().unwrap();
    assert_eq!(sparse.len(), 2);
    assert_eq!(sparse[0].voxel_count_label, "vec3s Voxels: 4096");
    // Primitive 3 is listed twice; the later row wins.
    assert_eq!(sparse[1].resolution, [48, 40, 40]);
    assert_eq!(sparse[1].voxel_count_label, "float Voxels: 25600");
}

#[test]
fn test_counts_from_fixture() {
    let counts = load().geo_counts().unwrap();
    assert_eq!(counts.points, Some(8));
    assert_eq!(counts.vertices, Some(24));
    assert_eq!(counts.vdbs, Some(3));
    assert_eq!(counts.packed_fragments, Some(0));
}

// ============================================================================
// Host interaction
// ============================================================================

#[test]
fn test_subnetwork_outputs_resolve_in_key_order() {
    let graph = SceneGraph {
        nodes: HashMap::from([
            ("OUT_geo", "/obj/geo1/geo_subnet/OUT_geo"),
            ("OUT_mask", "/obj/geo1/geo_subnet/OUT_mask"),
        ]),
    };
    let outputs = load().subnetwork_outputs(&graph).unwrap();
    assert_eq!(
        outputs,
        vec![
            "/obj/geo1/geo_subnet/OUT_geo".to_string(),
            "/obj/geo1/geo_subnet/OUT_mask".to_string(),
        ]
    );
}

#[test]
fn test_subnetwork_output_missing_from_graph() {
    let graph = SceneGraph {
        nodes: HashMap::from([("OUT_geo", "/obj/geo1/geo_subnet/OUT_geo")]),
    };
    let err = load().subnetwork_outputs(&graph).unwrap_err();
    assert_eq!(err.code(), 41);
    assert!(err.to_string().contains("OUT_mask"));
}

#[test]
fn test_non_geometry_node_is_rejected() {
    let node = CapturedNode {
        category: NodeCategory::Object,
        ..subnet()
    };
    let err = SopInfo::new(&node, NodestatConfig::default()).unwrap_err();
    log_test!("INFO", format!("rejected: {}", err));
    assert!(matches!(err, Error::InvalidNode { .. }));
}

#[test]
fn test_missing_fixture_surfaces_report_error() {
    let node = CapturedNode {
        fixture: "does_not_exist.json",
        ..subnet()
    };
    let err = SopInfo::new(&node, NodestatConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Report(_)));
}

// ============================================================================
// Configuration and export
// ============================================================================

#[test]
fn test_unit_scales_from_config() {
    let config = NodestatConfig::default().with_units(UnitScales {
        kb_to_megabytes: 1.0 / 1024.0,
        ..UnitScales::default()
    });
    let info = SopInfo::new(&subnet(), config).unwrap();
    let megabytes = info.memory_megabytes().unwrap().unwrap();
    assert!((megabytes - 12.41 / 1024.0).abs() < 1e-12);
}

#[test]
fn test_summary_exports_json() {
    let summary = load().summary().unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["name"], "geo_subnet");
    assert_eq!(json["geo_counts"]["points"], 8);
    assert_eq!(json["created_time"], "2019-03-14T09:26:00");
    assert_eq!(json["point_attributes"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_snapshot_json_is_stable() {
    let info = load();
    let json = info.report().to_json().unwrap();
    let reloaded = ReportNode::from_json(&json).unwrap();
    assert_eq!(&reloaded, info.report());

    let again = SopInfo::from_snapshot(info.identity().clone(), reloaded, NodestatConfig::default())
        .unwrap();
    assert_eq!(again.summary().unwrap(), info.summary().unwrap());
}
