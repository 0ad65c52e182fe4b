//! Expression tree produced by the literal parser.
//!
//! The tree is never executed as code. It is either narrowed to a plain
//! literal (see [`Expr::into_literal`]) or folded by the restricted
//! arithmetic evaluator in [`crate::coerce`].

use crate::value::ScalarValue;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Integer(i128),
    Float(f64),
    Str(String),
    Bool(bool),
    None,
    Tuple(Vec<Expr>),
    Unary {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Negate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOperator::Add => write!(f, "+"),
            BinaryOperator::Subtract => write!(f, "-"),
            BinaryOperator::Multiply => write!(f, "*"),
            BinaryOperator::Divide => write!(f, "/"),
        }
    }
}

/// Narrow an integer literal to the value domain; out of range becomes Float.
pub(crate) fn integer_value(n: i128) -> ScalarValue {
    match i64::try_from(n) {
        Ok(n) => ScalarValue::Integer(n),
        Err(_) => ScalarValue::Float(n as f64),
    }
}

impl Expr {
    /// Convert to a plain literal value.
    ///
    /// Accepts numbers, strings, booleans, `None`, tuples thereof, and a
    /// single sign directly in front of a number. Any operator expression
    /// yields `None`: literal fields never compute.
    pub fn into_literal(self) -> Option<ScalarValue> {
        match self {
            Expr::Integer(n) => Some(integer_value(n)),
            Expr::Float(n) => Some(ScalarValue::Float(n)),
            Expr::Str(s) => Some(ScalarValue::String(s)),
            Expr::Bool(b) => Some(ScalarValue::Boolean(b)),
            Expr::None => Some(ScalarValue::Absent),
            Expr::Tuple(items) => items
                .into_iter()
                .map(Expr::into_literal)
                .collect::<Option<Vec<_>>>()
                .map(ScalarValue::Tuple),
            Expr::Unary { op, operand } => match (op, *operand) {
                (UnaryOperator::Plus, Expr::Integer(n)) => Some(integer_value(n)),
                (UnaryOperator::Negate, Expr::Integer(n)) => Some(integer_value(-n)),
                (UnaryOperator::Plus, Expr::Float(n)) => Some(ScalarValue::Float(n)),
                (UnaryOperator::Negate, Expr::Float(n)) => Some(ScalarValue::Float(-n)),
                _ => None,
            },
            Expr::Binary { .. } => None,
        }
    }
}
