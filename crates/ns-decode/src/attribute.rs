//! Attribute table decoding.
//!
//! Each attribute row is normalized into a compact descriptor whose label
//! reads like `"P 3flt (Pos)"` or `"name str (12 unique)"`. Descriptors are
//! returned sorted by label so that two decodes of the same attribute set
//! compare equal regardless of the order the host listed them in.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use ns_common::{ReportNode, Result, Row};

use crate::schema::ATTRIBUTE_TABLE;

/// Parenthesized annotations such as `(32 bit)` or `(64-bit)`.
static RE_ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^()]*\)").expect("valid annotation pattern"));

const COL_NAME: usize = 0;
const COL_SIZE: usize = 1;
const COL_ATTR_TYPE: usize = 2;
const COL_VECTOR_TYPE: usize = 3;
const COL_N_UNIQUE: usize = 5;

/// Storage type of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseType {
    Int,
    Flt,
    Str,
    /// Unrecognized host type, whitespace removed.
    Other(String),
}

impl BaseType {
    fn from_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> Self {
        let joined: String = tokens
            .map(|token| match token {
                "Integer" => "int",
                "Float" | "Vector" => "flt",
                "String" => "str",
                other => other,
            })
            .collect();
        match joined.as_str() {
            "int" => BaseType::Int,
            "flt" => BaseType::Flt,
            "str" => BaseType::Str,
            _ => BaseType::Other(joined),
        }
    }

    pub fn token(&self) -> &str {
        match self {
            BaseType::Int => "int",
            BaseType::Flt => "flt",
            BaseType::Str => "str",
            BaseType::Other(token) => token,
        }
    }
}

/// Interpretation hint for vector-valued attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorSubtype {
    Vec,
    Pos,
    Nml,
    Clr,
    Matrix,
    Tex,
    Other(String),
}

impl VectorSubtype {
    /// Normalize a host vector type; `None` for empty and `Non-arithmetic`.
    fn parse(raw: &str) -> Option<Self> {
        let subtype = match raw.trim() {
            "" | "Non-arithmetic" => return None,
            "Vector" => VectorSubtype::Vec,
            "Position" => VectorSubtype::Pos,
            "Normal" => VectorSubtype::Nml,
            "Color" => VectorSubtype::Clr,
            "Transform Matrix" => VectorSubtype::Matrix,
            "Texture Coord" => VectorSubtype::Tex,
            other => VectorSubtype::Other(other.to_string()),
        };
        Some(subtype)
    }

    pub fn token(&self) -> &str {
        match self {
            VectorSubtype::Vec => "Vec",
            VectorSubtype::Pos => "Pos",
            VectorSubtype::Nml => "Nml",
            VectorSubtype::Clr => "Clr",
            VectorSubtype::Matrix => "Matrix",
            VectorSubtype::Tex => "Tex",
            VectorSubtype::Other(token) => token,
        }
    }
}

/// One decoded attribute row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeDescriptor {
    pub name: String,
    /// Tuple size, only kept when greater than one.
    pub size_prefix: Option<u64>,
    pub base_type: BaseType,
    pub array: bool,
    pub vector_subtype: Option<VectorSubtype>,
    pub unique_count: Option<u64>,
}

impl AttributeDescriptor {
    /// Type token such as `3flt` or `int[]`.
    pub fn type_token(&self) -> String {
        let mut token = self
            .size_prefix
            .map(|size| size.to_string())
            .unwrap_or_default();
        token.push_str(self.base_type.token());
        if self.array {
            token.push_str("[]");
        }
        token
    }

    /// Canonical display label.
    pub fn label(&self) -> String {
        self.to_string()
    }

    fn from_row(table: &str, index: usize, row: &Row) -> Result<Self> {
        let cell_error = |column: usize, message: String| {
            ATTRIBUTE_TABLE.cell_error(table, index, column, message)
        };

        let size_cell = row[COL_SIZE].trim();
        let size: i64 = size_cell
            .parse()
            .map_err(|_| cell_error(COL_SIZE, format!("'{}' is not an integer", size_cell)))?;
        let size_prefix = u64::try_from(size).ok().filter(|size| *size > 1);

        let stripped = RE_ANNOTATION.replace_all(&row[COL_ATTR_TYPE], "");
        let array = stripped.split_whitespace().any(|token| token == "Array");
        let base_type = BaseType::from_tokens(
            stripped
                .split_whitespace()
                .filter(|token| *token != "Array"),
        );

        let unique_cell = row[COL_N_UNIQUE].trim();
        let unique_count = if unique_cell.is_empty() {
            None
        } else {
            let count = unique_cell.parse::<u64>().map_err(|_| {
                cell_error(COL_N_UNIQUE, format!("'{}' is not a count", unique_cell))
            })?;
            Some(count)
        };

        Ok(AttributeDescriptor {
            name: row[COL_NAME].clone(),
            size_prefix,
            base_type,
            array,
            vector_subtype: VectorSubtype::parse(&row[COL_VECTOR_TYPE]),
            unique_count,
        })
    }
}

impl fmt::Display for AttributeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![self.name.clone(), self.type_token()];
        if let Some(subtype) = &self.vector_subtype {
            parts.push(format!("({})", subtype.token()));
        }
        if let Some(count) = self.unique_count {
            parts.push(format!("({} unique)", count));
        }
        parts.retain(|part| !part.is_empty());
        write!(f, "{}", parts.join(" "))
    }
}

/// Decode the rows of one attribute table, sorted by label.
///
/// # Errors
/// [`ns_common::Error::RowArity`] if any row is not 7 columns wide,
/// [`ns_common::Error::Format`] for a non-integer size or unique count.
pub fn decode_attributes(table: &str, rows: &[Row]) -> Result<Vec<AttributeDescriptor>> {
    let rows = ATTRIBUTE_TABLE.validate(table, rows)?;
    let mut attributes = rows
        .iter()
        .enumerate()
        .map(|(index, row)| AttributeDescriptor::from_row(table, index, row))
        .collect::<Result<Vec<_>>>()?;
    attributes.sort_by_cached_key(AttributeDescriptor::label);

    tracing::debug!(table, count = attributes.len(), "decoded attribute table");
    Ok(attributes)
}

/// Decode the attribute table `section` under `parent`; empty when absent.
pub fn attributes_in(parent: &ReportNode, section: &str) -> Result<Vec<AttributeDescriptor>> {
    match parent.try_branch(section) {
        Some(node) => decode_attributes(section, node.rows()),
        None => Ok(Vec::new()),
    }
}
