//! Volume and sparse volume table decoding.
//!
//! Both tables describe one volume primitive per row. Rows are keyed by
//! primitive index: a later row with the same index replaces the earlier
//! one, and descriptors come out in ascending index order.

use std::collections::BTreeMap;

use serde::Serialize;

use ns_common::{Error, ReportNode, Result, Row};

use crate::coerce::parse_literal;
use crate::schema::{TableSchema, SPARSE_VOLUME_TABLE, VOLUME_TABLE};
use crate::value::ScalarValue;

/// A dense volume primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeDescriptor {
    pub primitive_index: i64,
    pub name: String,
    pub resolution: [i64; 3],
    /// `"Voxels: <count>"`
    pub voxel_count_label: String,
    /// `"Voxel Size: <size>"`
    pub voxel_size_label: String,
}

/// A sparse (VDB) volume primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SparseVolumeDescriptor {
    pub primitive_index: i64,
    pub name: String,
    /// Voxel storage type as reported by the host, e.g. `float` or `vec3s`.
    pub data_type: String,
    pub resolution: [i64; 3],
    /// `"<data_type> Voxels: <count>"`
    pub voxel_count_label: String,
    pub voxel_size_label: String,
}

/// Cell accessor that turns bad cells into errors naming the location.
struct Cells<'r> {
    schema: &'static TableSchema,
    table: &'r str,
    index: usize,
    row: &'r Row,
}

impl<'r> Cells<'r> {
    fn text(&self, column: &str) -> &'r str {
        self.schema
            .column(column)
            .and_then(|c| self.row.get(c))
            .map_or("", String::as_str)
    }

    fn error(&self, column: &str, message: String) -> Error {
        let position = self.schema.column(column).unwrap_or(usize::MAX);
        self.schema.cell_error(self.table, self.index, position, message)
    }

    fn primitive_index(&self) -> Result<i64> {
        let cell = self.text("primitive_index").trim();
        cell.parse()
            .map_err(|_| self.error("primitive_index", format!("'{}' is not an integer", cell)))
    }

    fn resolution(&self) -> Result<[i64; 3]> {
        let cell = self.text("resolution");
        let value = parse_literal(cell)
            .map_err(|e| self.error("resolution", format!("'{}': {}", cell, e)))?;

        let context = format!("{} row {} resolution", self.table, self.index);
        let expected = "a 3-tuple of integers";
        match value.as_tuple() {
            Some([ScalarValue::Integer(x), ScalarValue::Integer(y), ScalarValue::Integer(z)]) => {
                Ok([*x, *y, *z])
            }
            _ => Err(Error::shape(context, expected, value.kind())),
        }
    }

    fn voxel_size_label(&self) -> String {
        format!("Voxel Size: {}", self.text("voxel_size"))
    }
}

/// Validate, decode and key rows by primitive index.
fn decode_indexed<T>(
    schema: &'static TableSchema,
    table: &str,
    rows: &[Row],
    build: impl Fn(&Cells<'_>) -> Result<(i64, T)>,
) -> Result<Vec<T>> {
    let rows = schema.validate(table, rows)?;
    let mut by_index = BTreeMap::new();
    for (index, row) in rows.iter().enumerate() {
        let cells = Cells {
            schema,
            table,
            index,
            row,
        };
        let (primitive, descriptor) = build(&cells)?;
        if by_index.insert(primitive, descriptor).is_some() {
            tracing::warn!(table, primitive, row = index, "duplicate primitive index, keeping later row");
        }
    }

    tracing::debug!(table, count = by_index.len(), "decoded volume table");
    Ok(by_index.into_values().collect())
}

/// Decode a `Volumes` table (6 columns).
pub fn decode_volumes(table: &str, rows: &[Row]) -> Result<Vec<VolumeDescriptor>> {
    decode_indexed(&VOLUME_TABLE, table, rows, |cells| {
        let primitive_index = cells.primitive_index()?;
        Ok((
            primitive_index,
            VolumeDescriptor {
                primitive_index,
                name: cells.text("name").to_string(),
                resolution: cells.resolution()?,
                voxel_count_label: format!("Voxels: {}", cells.text("voxel_count")),
                voxel_size_label: cells.voxel_size_label(),
            },
        ))
    })
}

/// Decode a `Sparse Volumes` table (11 columns).
pub fn decode_sparse_volumes(table: &str, rows: &[Row]) -> Result<Vec<SparseVolumeDescriptor>> {
    decode_indexed(&SPARSE_VOLUME_TABLE, table, rows, |cells| {
        let primitive_index = cells.primitive_index()?;
        let data_type = cells.text("data_type").to_string();
        Ok((
            primitive_index,
            SparseVolumeDescriptor {
                primitive_index,
                name: cells.text("name").to_string(),
                resolution: cells.resolution()?,
                voxel_count_label: format!("{} Voxels: {}", data_type, cells.text("voxel_count")),
                voxel_size_label: cells.voxel_size_label(),
                data_type,
            },
        ))
    })
}

/// Dense volumes under `parent`; empty when the section is absent.
pub fn volumes_in(parent: &ReportNode, section: &str) -> Result<Vec<VolumeDescriptor>> {
    match parent.try_branch(section) {
        Some(node) => decode_volumes(section, node.rows()),
        None => Ok(Vec::new()),
    }
}

/// Sparse volumes under `parent`; empty when the section is absent.
pub fn sparse_volumes_in(parent: &ReportNode, section: &str) -> Result<Vec<SparseVolumeDescriptor>> {
    match parent.try_branch(section) {
        Some(node) => decode_sparse_volumes(section, node.rows()),
        None => Ok(Vec::new()),
    }
}
