//! Recursive descent parser over the closed literal token set.
//!
//! GRAMMAR:
//!   input          --> sequence EOF
//!   sequence       --> additive ( "," additive )* ","?
//!   additive       --> multiplicative ( ("+" | "-") multiplicative )*
//!   multiplicative --> unary ( ("*" | "/") unary )*
//!   unary          --> ("+" | "-") unary | primary
//!   primary        --> INTEGER | FLOAT | STRING | "True" | "False" | "None"
//!                    | "(" ")" | "(" sequence ")"
//!
//! A sequence with at least one comma is a tuple; a parenthesized sequence
//! without a comma is plain grouping. There are no names, calls,
//! subscripts, or attribute access: any other identifier is a parse error.

use thiserror::Error;

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::lexer::Lexer;
use crate::token::Token;

/// Nesting limit for parentheses and signs.
pub const MAX_DEPTH: usize = 64;

/// Limit on binary operators in one input. Operator chains build a
/// left-leaning tree, so this also bounds its depth.
pub const MAX_OPERATORS: usize = 256;

/// Parser error with a descriptive message.
#[derive(Error, Debug, PartialEq, Clone)]
#[error("parse error: {message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        ParseError {
            message: message.into(),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
    depth: usize,
    operators: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser and advances to the first token.
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token();
        Parser {
            lexer,
            current_token,
            depth: 0,
            operators: 0,
        }
    }

    /// Parses the entire input.
    pub fn parse(&mut self) -> ParseResult<Expr> {
        if self.current_token == Token::Eof {
            return Err(ParseError::new("empty input"));
        }

        let expr = self.parse_sequence()?;

        if self.current_token != Token::Eof {
            return Err(ParseError::new(format!(
                "unexpected {} after expression",
                self.current_token
            )));
        }
        Ok(expr)
    }

    fn advance(&mut self) {
        self.current_token = self.lexer.next_token();
    }

    fn expect(&mut self, expected: Token) -> ParseResult<()> {
        if self.current_token == expected {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::new(format!(
                "expected {}, found {}",
                expected, self.current_token
            )))
        }
    }

    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::new("nesting too deep"));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn count_operator(&mut self) -> ParseResult<()> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(ParseError::new("expression too long"));
        }
        Ok(())
    }

    fn parse_sequence(&mut self) -> ParseResult<Expr> {
        let first = self.parse_additive()?;
        if self.current_token != Token::Comma {
            return Ok(first);
        }

        let mut items = vec![first];
        while self.current_token == Token::Comma {
            self.advance();
            if matches!(self.current_token, Token::RParen | Token::Eof) {
                break;
            }
            items.push(self.parse_additive()?);
        }
        Ok(Expr::Tuple(items))
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.current_token {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };
            self.count_operator()?;
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.current_token {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };
            self.count_operator()?;
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let op = match self.current_token {
            Token::Plus => UnaryOperator::Plus,
            Token::Minus => UnaryOperator::Negate,
            _ => return self.parse_primary(),
        };
        self.advance();
        self.enter()?;
        let operand = self.parse_unary();
        self.leave();
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand?),
        })
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = std::mem::replace(&mut self.current_token, Token::Eof);
        match token {
            Token::Integer(n) => {
                self.advance();
                Ok(Expr::Integer(n))
            }
            Token::Float(n) => {
                self.advance();
                Ok(Expr::Float(n))
            }
            Token::Str(s) => {
                self.advance();
                Ok(Expr::Str(s))
            }
            Token::Ident(name) => {
                let expr = match name.as_str() {
                    "True" => Expr::Bool(true),
                    "False" => Expr::Bool(false),
                    "None" => Expr::None,
                    _ => return Err(ParseError::new(format!("unknown name '{}'", name))),
                };
                self.advance();
                Ok(expr)
            }
            Token::LParen => {
                self.advance();
                if self.current_token == Token::RParen {
                    self.advance();
                    return Ok(Expr::Tuple(Vec::new()));
                }
                self.enter()?;
                let inner = self.parse_sequence();
                self.leave();
                let inner = inner?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            other => Err(ParseError::new(format!("unexpected {}", other))),
        }
    }
}

/// Parse a complete literal/expression string.
pub fn parse(input: &str) -> ParseResult<Expr> {
    Parser::new(input).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i128) -> Expr {
        Expr::Integer(n)
    }

    #[test]
    fn test_scalar() {
        assert_eq!(parse("42").unwrap(), int(42));
        assert_eq!(parse("'x'").unwrap(), Expr::Str("x".into()));
        assert_eq!(parse("True").unwrap(), Expr::Bool(true));
        assert_eq!(parse("None").unwrap(), Expr::None);
    }

    #[test]
    fn test_tuples() {
        assert_eq!(
            parse("(1, 2, 3)").unwrap(),
            Expr::Tuple(vec![int(1), int(2), int(3)])
        );
        assert_eq!(parse("(1,)").unwrap(), Expr::Tuple(vec![int(1)]));
        assert_eq!(parse("()").unwrap(), Expr::Tuple(vec![]));
        assert_eq!(parse("(7)").unwrap(), int(7));
        assert_eq!(parse("1, 2").unwrap(), Expr::Tuple(vec![int(1), int(2)]));
        assert_eq!(
            parse("((1, 2), (3,))").unwrap(),
            Expr::Tuple(vec![
                Expr::Tuple(vec![int(1), int(2)]),
                Expr::Tuple(vec![int(3)])
            ])
        );
    }

    #[test]
    fn test_precedence() {
        let expr = parse("1 + 2 * 3").unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                left: Box::new(int(1)),
                op: BinaryOperator::Add,
                right: Box::new(Expr::Binary {
                    left: Box::new(int(2)),
                    op: BinaryOperator::Multiply,
                    right: Box::new(int(3)),
                }),
            }
        );
    }

    #[test]
    fn test_rejects_names_and_calls() {
        assert!(parse("os").is_err());
        assert!(parse("__import__('os')").is_err());
        assert!(parse("len((1, 2))").is_err());
        assert!(parse("(1, 2)[0]").is_err());
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
        assert!(parse("(1, 2").is_err());
        assert!(parse("1 2").is_err());
        assert!(parse(",").is_err());
        assert!(parse("(,)").is_err());
    }

    #[test]
    fn test_depth_limit() {
        let deep = format!("{}1{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert!(parse(&deep).is_err());
        let shallow = format!("{}1{}", "(".repeat(8), ")".repeat(8));
        assert_eq!(parse(&shallow).unwrap(), int(1));
        assert!(parse(&"-".repeat(10_000)).is_err());
    }

    #[test]
    fn test_operator_limit() {
        let at_limit = format!("{}1", "1+".repeat(MAX_OPERATORS));
        assert!(parse(&at_limit).is_ok());

        let over = format!("{}1", "2*".repeat(MAX_OPERATORS + 1));
        let err = parse(&over).unwrap_err();
        assert_eq!(err.message, "expression too long");

        // Counted across groups, not per group.
        let grouped = vec!["(1+1)"; MAX_OPERATORS + 1].join(",");
        assert!(parse(&grouped).is_err());
    }
}
