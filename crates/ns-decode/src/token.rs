//! Tokens of the literal grammar.

/// Tokens recognized by the literal lexer.
///
/// The set is closed: anything outside it lexes to [`Token::Illegal`] and
/// makes the parse fail.
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    // Literals
    /// Unsigned decimal integer. Wide enough that `-9223372036854775808`
    /// survives negation before narrowing to i64.
    Integer(i128),
    Float(f64),
    Str(String),
    /// Bare word. Only `True`, `False` and `None` are accepted by the parser.
    Ident(String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,

    // Delimiters
    LParen,
    RParen,
    Comma,

    // Special
    Eof,
    Illegal(char),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Integer(n) => write!(f, "{}", n),
            Token::Float(n) => write!(f, "{:?}", n),
            Token::Str(s) => write!(f, "{:?}", s),
            Token::Ident(s) => write!(f, "{}", s),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Eof => write!(f, "end of input"),
            Token::Illegal(c) => write!(f, "illegal character {:?}", c),
        }
    }
}
