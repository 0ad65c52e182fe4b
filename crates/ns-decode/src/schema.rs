//! Column contracts for the fixed-shape report tables.
//!
//! Each table decoder validates every row against its schema before
//! reading any cell, so a host that adds or drops a column produces a
//! [`Error::RowArity`] naming the table instead of misaligned fields.

use ns_common::{Error, Result, Row};

/// Named, ordered columns of one table type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    /// Table type, used in messages when the section name is not known.
    pub kind: &'static str,
    pub columns: &'static [&'static str],
}

impl TableSchema {
    pub const fn arity(&self) -> usize {
        self.columns.len()
    }

    /// Position of a named column.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == name)
    }

    /// Check every row of `table` against this schema.
    ///
    /// # Errors
    /// [`Error::RowArity`] for the first row with the wrong column count.
    pub fn validate<'r>(&self, table: &str, rows: &'r [Row]) -> Result<&'r [Row]> {
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != self.arity())
        {
            return Err(Error::RowArity {
                table: table.to_string(),
                row,
                expected: self.arity(),
                actual: cells.len(),
            });
        }
        Ok(rows)
    }

    /// Format error for a bad cell, naming table, row and column.
    pub fn cell_error(&self, table: &str, row: usize, column: usize, message: impl Into<String>) -> Error {
        let column = self.columns.get(column).copied().unwrap_or("?");
        Error::format(format!("{} row {} column '{}'", table, row, column), message)
    }
}

/// Attribute tables (`Point Attributes`, `Detail Attributes`, ...).
pub const ATTRIBUTE_TABLE: TableSchema = TableSchema {
    kind: "attribute",
    columns: &[
        "name",
        "size",
        "attr_type",
        "vector_type",
        "sub_type",
        "n_unique",
        "trailing",
    ],
};

/// Dense `Volumes` table.
pub const VOLUME_TABLE: TableSchema = TableSchema {
    kind: "volume",
    columns: &[
        "primitive_index",
        "name",
        "voxel_size",
        "resolution",
        "voxel_count",
        "vol_type",
    ],
};

/// `Sparse Volumes` table.
pub const SPARSE_VOLUME_TABLE: TableSchema = TableSchema {
    kind: "sparse volume",
    columns: &[
        "primitive_index",
        "name",
        "vol_type",
        "data_type",
        "voxel_size",
        "resolution",
        "voxel_count",
        "banding_size",
        "vol_hint",
        "reserved_1",
        "reserved_2",
    ],
};
