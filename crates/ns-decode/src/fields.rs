//! Key/value section decoding.
//!
//! Summary sections (`SOP Info`, `General Info`, `Dependency`, ...) carry a
//! two-column table of field name and value. Some hosts split a value over
//! several cells (e.g. the components of a coordinate); such rows keep the
//! extra cells as a token sequence for [`crate::coerce::evaluate_tokens`].

use std::borrow::Cow;
use std::collections::BTreeMap;

use ns_common::{Error, ReportNode, Result};

use crate::coerce::{coerce, Raw};
use crate::value::ScalarValue;

/// One field value cell (or cells).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Tokens(Vec<String>),
}

impl FieldValue {
    pub fn as_raw(&self) -> Raw<'_> {
        match self {
            FieldValue::Text(text) => Raw::Text(text),
            FieldValue::Tokens(tokens) => Raw::Tokens(tokens),
        }
    }

    /// Text view; split values are rejoined with single spaces.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(text) => Cow::Borrowed(text),
            FieldValue::Tokens(tokens) => Cow::Owned(tokens.join(" ")),
        }
    }
}

/// Fields of one section, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    section: String,
    values: BTreeMap<String, FieldValue>,
}

impl FieldMap {
    /// A map with no fields, standing in for an absent section.
    pub fn empty(section: impl Into<String>) -> Self {
        FieldMap {
            section: section.into(),
            values: BTreeMap::new(),
        }
    }

    /// Build from a section's rows. Later rows win on duplicate keys.
    ///
    /// # Errors
    /// [`Error::RowArity`] for a row with fewer than two cells.
    pub fn from_section(section: &str, node: &ReportNode) -> Result<Self> {
        let mut values = BTreeMap::new();
        for (index, row) in node.rows().iter().enumerate() {
            let value = match row.as_slice() {
                [_, value] => FieldValue::Text(value.clone()),
                [_, rest @ ..] if rest.len() > 1 => FieldValue::Tokens(rest.to_vec()),
                _ => {
                    return Err(Error::RowArity {
                        table: section.to_string(),
                        row: index,
                        expected: 2,
                        actual: row.len(),
                    })
                }
            };
            values.insert(row[0].clone(), value);
        }
        Ok(FieldMap {
            section: section.to_string(),
            values,
        })
    }

    /// Fields of the named child of `parent`, empty when the child is absent.
    pub fn from_branch(parent: &ReportNode, section: &str) -> Result<Self> {
        match parent.try_branch(section) {
            Some(node) => Self::from_section(section, node),
            None => Ok(Self::empty(section)),
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn raw(&self, key: &str) -> Raw<'_> {
        self.get(key).map_or(Raw::Absent, FieldValue::as_raw)
    }

    pub fn text(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(FieldValue::text)
    }

    /// Text of a field the caller cannot do without.
    ///
    /// # Errors
    /// [`Error::MissingField`] naming this section and the key.
    pub fn require_text(&self, key: &str) -> Result<Cow<'_, str>> {
        self.text(key).ok_or_else(|| Error::MissingField {
            section: self.section.clone(),
            field: key.to_string(),
        })
    }

    /// Coerced value of a field; absent fields give [`ScalarValue::Absent`].
    pub fn coerce(&self, key: &str) -> Result<ScalarValue> {
        coerce(self.raw(key))
    }

    /// Fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section() -> ReportNode {
        ReportNode::new()
            .with_row(["Total Cooks", "12"])
            .with_row(["Center", "(0", ",", "1.5", ",", "0)"])
            .with_row(["Total Cooks", "13"])
    }

    #[test]
    fn test_later_rows_win() {
        let fields = FieldMap::from_section("General Info", &section()).unwrap();
        assert_eq!(fields.coerce("Total Cooks").unwrap(), ScalarValue::Integer(13));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_split_values_become_tokens() {
        let fields = FieldMap::from_section("SOP Info", &section()).unwrap();
        assert!(matches!(fields.get("Center"), Some(FieldValue::Tokens(t)) if t.len() == 5));
        assert_eq!(
            fields.coerce("Center").unwrap(),
            ScalarValue::Tuple(vec![0i64.into(), ScalarValue::Float(1.5), 0i64.into()])
        );
    }

    #[test]
    fn test_missing_field() {
        let fields = FieldMap::from_section("General Info", &section()).unwrap();
        assert_eq!(fields.coerce("Memory").unwrap(), ScalarValue::Absent);
        match fields.require_text("Created Time") {
            Err(Error::MissingField { section, field }) => {
                assert_eq!(section, "General Info");
                assert_eq!(field, "Created Time");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_short_row_is_rejected() {
        let node = ReportNode::new().with_row(["Lonely"]);
        let err = FieldMap::from_section("Dependency", &node).unwrap_err();
        assert!(matches!(err, Error::RowArity { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn test_from_branch_absent_is_empty() {
        let fields = FieldMap::from_branch(&ReportNode::new(), "Dependency").unwrap();
        assert!(fields.is_empty());
        assert_eq!(fields.section(), "Dependency");
    }

    #[test]
    fn test_iter_is_key_ordered() {
        let node = ReportNode::new()
            .with_row(["Output 1", "/obj/geo1/sub/out1"])
            .with_row(["Output 0", "/obj/geo1/sub/out0"]);
        let fields = FieldMap::from_section("Subnetwork SOP Info", &node).unwrap();
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Output 0", "Output 1"]);
    }
}
