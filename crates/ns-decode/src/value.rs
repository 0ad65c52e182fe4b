//! Typed values produced by literal coercion.

use serde::Serialize;

/// A coerced field value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    /// Field not present in the report.
    #[default]
    Absent,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Tuple(Vec<ScalarValue>),
}

impl ScalarValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, ScalarValue::Absent)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScalarValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view; integers widen to f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Integer(n) => Some(*n as f64),
            ScalarValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[ScalarValue]> {
        match self {
            ScalarValue::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ScalarValue::Integer(_) | ScalarValue::Float(_))
    }

    /// Short description of the value's kind, for shape errors.
    pub fn kind(&self) -> String {
        match self {
            ScalarValue::Absent => "nothing".to_string(),
            ScalarValue::Boolean(_) => "a boolean".to_string(),
            ScalarValue::Integer(_) => "an integer".to_string(),
            ScalarValue::Float(_) => "a float".to_string(),
            ScalarValue::String(_) => "a string".to_string(),
            ScalarValue::Tuple(items) => format!("a {}-tuple", items.len()),
        }
    }

    /// Serialize back into literal syntax.
    ///
    /// Coercing the result yields a value equal to `self` (floats use the
    /// shortest round-tripping representation).
    pub fn to_literal(&self) -> String {
        let mut out = String::new();
        self.write_literal(&mut out);
        out
    }

    fn write_literal(&self, out: &mut String) {
        match self {
            ScalarValue::Absent => out.push_str("None"),
            ScalarValue::Boolean(true) => out.push_str("True"),
            ScalarValue::Boolean(false) => out.push_str("False"),
            ScalarValue::Integer(n) => out.push_str(&n.to_string()),
            ScalarValue::Float(n) => out.push_str(&format!("{:?}", n)),
            ScalarValue::String(s) => {
                out.push('\'');
                for ch in s.chars() {
                    match ch {
                        '\\' => out.push_str("\\\\"),
                        '\'' => out.push_str("\\'"),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        '\t' => out.push_str("\\t"),
                        '\0' => out.push_str("\\0"),
                        c => out.push(c),
                    }
                }
                out.push('\'');
            }
            ScalarValue::Tuple(items) => {
                out.push('(');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_literal(out);
                }
                if items.len() == 1 {
                    out.push(',');
                }
                out.push(')');
            }
        }
    }
}

impl std::fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarValue::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other.to_literal()),
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Boolean(b)
    }
}

impl From<i64> for ScalarValue {
    fn from(n: i64) -> Self {
        ScalarValue::Integer(n)
    }
}

impl From<f64> for ScalarValue {
    fn from(n: f64) -> Self {
        ScalarValue::Float(n)
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_literal() {
        assert_eq!(ScalarValue::Integer(-3).to_literal(), "-3");
        assert_eq!(ScalarValue::Float(1.0).to_literal(), "1.0");
        assert_eq!(ScalarValue::from("it's").to_literal(), r"'it\'s'");
        assert_eq!(
            ScalarValue::Tuple(vec![1i64.into(), ScalarValue::Float(2.5)]).to_literal(),
            "(1, 2.5)"
        );
        assert_eq!(ScalarValue::Tuple(vec![true.into()]).to_literal(), "(True,)");
        assert_eq!(ScalarValue::Tuple(vec![]).to_literal(), "()");
        assert_eq!(ScalarValue::Absent.to_literal(), "None");
    }

    #[test]
    fn test_display_keeps_strings_raw() {
        assert_eq!(ScalarValue::from("12 MB").to_string(), "12 MB");
        assert_eq!(ScalarValue::Integer(7).to_string(), "7");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(ScalarValue::Integer(4).as_f64(), Some(4.0));
        assert_eq!(ScalarValue::Float(4.5).as_i64(), None);
        assert!(ScalarValue::default().is_absent());
        assert_eq!(ScalarValue::Tuple(vec![1i64.into()]).kind(), "a 1-tuple");
    }

    #[test]
    fn test_serialize_untagged() {
        let value = ScalarValue::Tuple(vec![
            ScalarValue::Integer(1),
            ScalarValue::from("a"),
            ScalarValue::Absent,
        ]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[1,"a",null]"#);
    }
}
