//! Literal coercion engine.
//!
//! Converts a raw report field into a [`ScalarValue`]:
//!
//! 1. Absent stays [`ScalarValue::Absent`].
//! 2. Exactly `"Yes"` / `"No"` become booleans.
//! 3. Any other single string is parsed as a literal (number, quoted
//!    string, tuple). If that fails the original string is returned
//!    unchanged; text coercion never errors.
//! 4. A pre-split token sequence is joined and folded as a restricted
//!    arithmetic expression (numbers, parentheses, `+ - * /`, commas). The
//!    result must be numeric or a tuple of numerics.

use ns_common::{Error, Result};

use crate::ast::{integer_value, BinaryOperator, Expr, UnaryOperator};
use crate::parser::{self, ParseError};
use crate::value::ScalarValue;

/// A raw field as it arrives from a report table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Raw<'a> {
    Absent,
    Text(&'a str),
    Tokens(&'a [String]),
}

impl<'a> From<Option<&'a str>> for Raw<'a> {
    fn from(value: Option<&'a str>) -> Self {
        match value {
            Some(text) => Raw::Text(text),
            None => Raw::Absent,
        }
    }
}

impl<'a> From<&'a str> for Raw<'a> {
    fn from(text: &'a str) -> Self {
        Raw::Text(text)
    }
}

impl<'a> From<&'a [String]> for Raw<'a> {
    fn from(tokens: &'a [String]) -> Self {
        Raw::Tokens(tokens)
    }
}

/// Coerce any raw field.
///
/// Only the token path can fail, with [`Error::Expression`].
pub fn coerce(raw: Raw<'_>) -> Result<ScalarValue> {
    match raw {
        Raw::Absent => Ok(ScalarValue::Absent),
        Raw::Text(text) => Ok(coerce_text(text)),
        Raw::Tokens(tokens) => evaluate_tokens(tokens),
    }
}

/// Coerce a single string, falling back to the string itself.
pub fn coerce_text(text: &str) -> ScalarValue {
    match text {
        "Yes" => ScalarValue::Boolean(true),
        "No" => ScalarValue::Boolean(false),
        _ => match parse_literal(text) {
            Ok(value) => value,
            Err(err) => {
                tracing::trace!(input = text, error = %err, "kept field as raw string");
                ScalarValue::String(text.to_string())
            }
        },
    }
}

/// Strictly parse a literal; no Yes/No handling and no fallback.
pub fn parse_literal(text: &str) -> std::result::Result<ScalarValue, ParseError> {
    parser::parse(text)?
        .into_literal()
        .ok_or_else(|| ParseError::new("operators are not allowed in a literal"))
}

/// Join pre-split tokens and fold them as a restricted arithmetic expression.
pub fn evaluate_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<ScalarValue> {
    let joined: String = tokens.iter().map(AsRef::as_ref).collect();
    let reject = |message: String| Error::Expression {
        input: joined.clone(),
        message,
    };

    let expr = parser::parse(&joined).map_err(|e| reject(e.message))?;
    fold(expr).map_err(reject)
}

fn fold(expr: Expr) -> std::result::Result<ScalarValue, String> {
    match expr {
        Expr::Integer(n) => Ok(integer_value(n)),
        Expr::Float(n) => Ok(ScalarValue::Float(n)),
        Expr::Tuple(items) => items
            .into_iter()
            .map(fold)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(ScalarValue::Tuple),
        Expr::Unary { op, operand } => {
            let value = fold(*operand)?;
            match (op, value) {
                (UnaryOperator::Plus, v @ (ScalarValue::Integer(_) | ScalarValue::Float(_))) => {
                    Ok(v)
                }
                (UnaryOperator::Negate, ScalarValue::Integer(n)) => n
                    .checked_neg()
                    .map(ScalarValue::Integer)
                    .ok_or_else(|| "integer overflow".to_string()),
                (UnaryOperator::Negate, ScalarValue::Float(n)) => Ok(ScalarValue::Float(-n)),
                (_, other) => Err(format!("cannot apply sign to {}", other.kind())),
            }
        }
        Expr::Binary { left, op, right } => {
            let left = fold(*left)?;
            let right = fold(*right)?;
            apply(op, left, right)
        }
        Expr::Str(_) | Expr::Bool(_) | Expr::None => {
            Err("only numeric literals are allowed".to_string())
        }
    }
}

fn apply(
    op: BinaryOperator,
    left: ScalarValue,
    right: ScalarValue,
) -> std::result::Result<ScalarValue, String> {
    use ScalarValue::{Float, Integer};

    match (op, left, right) {
        (BinaryOperator::Divide, l, r) => {
            let (Some(a), Some(b)) = (l.as_f64(), r.as_f64()) else {
                return Err(format!("cannot divide {} by {}", l.kind(), r.kind()));
            };
            if b == 0.0 {
                return Err("division by zero".to_string());
            }
            Ok(Float(a / b))
        }
        (op, Integer(a), Integer(b)) => {
            let result = match op {
                BinaryOperator::Add => a.checked_add(b),
                BinaryOperator::Subtract => a.checked_sub(b),
                _ => a.checked_mul(b),
            };
            result
                .map(Integer)
                .ok_or_else(|| format!("integer overflow in {} {} {}", a, op, b))
        }
        (op, l, r) => match (l.as_f64(), r.as_f64()) {
            (Some(a), Some(b)) => Ok(Float(match op {
                BinaryOperator::Add => a + b,
                BinaryOperator::Subtract => a - b,
                _ => a * b,
            })),
            _ => Err(format!("cannot apply {} to {} and {}", op, l.kind(), r.kind())),
        },
    }
}
