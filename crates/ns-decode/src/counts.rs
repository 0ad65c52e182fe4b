//! Per-element geometry counts from the `Counts` section.

use serde::Serialize;

use ns_common::sections::{fields, COUNTS};
use ns_common::{Error, ReportNode, Result};

use crate::fields::FieldMap;
use crate::value::ScalarValue;

/// Element counts of a geometry. Fields the host omits stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GeoCounts {
    pub points: Option<i64>,
    pub primitives: Option<i64>,
    pub vertices: Option<i64>,
    pub volumes: Option<i64>,
    pub vdbs: Option<i64>,
    pub packed_geometries: Option<i64>,
    pub packed_fragments: Option<i64>,
}

impl GeoCounts {
    /// Counts in display order with their short labels.
    pub fn entries(&self) -> [(&'static str, Option<i64>); 7] {
        [
            (fields::POINTS, self.points),
            (fields::PRIMITIVES, self.primitives),
            (fields::VERTICES, self.vertices),
            (fields::VOLUMES, self.volumes),
            (fields::VDBS, self.vdbs),
            ("Packed Geos", self.packed_geometries),
            (fields::PACKED_FRAGMENTS, self.packed_fragments),
        ]
    }
}

fn count(map: &FieldMap, key: &str) -> Result<Option<i64>> {
    match map.coerce(key)? {
        ScalarValue::Absent => Ok(None),
        ScalarValue::Integer(n) => Ok(Some(n)),
        other => Err(Error::format(
            format!("{} '{}'", map.section(), key),
            format!("expected an integer count, got {}", other.kind()),
        )),
    }
}

/// Decode the `Counts` child of `sop_info`; all `None` when it is absent.
pub fn decode_counts(sop_info: &ReportNode) -> Result<GeoCounts> {
    let map = FieldMap::from_branch(sop_info, COUNTS)?;
    Ok(GeoCounts {
        points: count(&map, fields::POINTS)?,
        primitives: count(&map, fields::PRIMITIVES)?,
        vertices: count(&map, fields::VERTICES)?,
        volumes: count(&map, fields::VOLUMES)?,
        vdbs: count(&map, fields::VDBS)?,
        packed_geometries: count(&map, fields::PACKED_GEOMETRIES)?,
        packed_fragments: count(&map, fields::PACKED_FRAGMENTS)?,
    })
}
