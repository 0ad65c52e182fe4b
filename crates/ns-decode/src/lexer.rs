//! Scans a raw field string into [`Token`]s.
//!
//! Handles whitespace skipping, decimal numbers with optional fraction and
//! exponent, single/double quoted strings with backslash escapes, and bare
//! words. Unterminated strings and unknown characters lex to
//! [`Token::Illegal`].

use std::iter::Peekable;
use std::str::Chars;

use crate::token::Token;

pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.chars().peekable(),
        }
    }

    /// Advances the lexer and returns the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        match self.input.next() {
            Some('+') => Token::Plus,
            Some('-') => Token::Minus,
            Some('*') => Token::Star,
            Some('/') => Token::Slash,
            Some('(') => Token::LParen,
            Some(')') => Token::RParen,
            Some(',') => Token::Comma,
            Some(q @ ('"' | '\'')) => self.read_string(q),
            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.read_number(ch),
            Some(ch) if ch.is_alphabetic() || ch == '_' => self.read_ident(ch),
            None => Token::Eof,
            Some(ch) => Token::Illegal(ch),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.input.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.input.next();
        }
    }

    fn read_string(&mut self, quote: char) -> Token {
        let mut result = String::new();
        while let Some(ch) = self.input.next() {
            match ch {
                c if c == quote => return Token::Str(result),
                '\\' => match self.input.next() {
                    Some('n') => result.push('\n'),
                    Some('t') => result.push('\t'),
                    Some('r') => result.push('\r'),
                    Some('0') => result.push('\0'),
                    Some(c @ ('\\' | '\'' | '"')) => result.push(c),
                    // Unknown escapes are kept verbatim.
                    Some(c) => {
                        result.push('\\');
                        result.push(c);
                    }
                    None => break,
                },
                c => result.push(c),
            }
        }
        Token::Illegal(quote)
    }

    fn read_number(&mut self, first_char: char) -> Token {
        let mut text = String::from(first_char);
        let mut is_float = first_char == '.';

        self.read_digits(&mut text);
        if !is_float && self.input.peek() == Some(&'.') {
            is_float = true;
            text.push('.');
            self.input.next();
            self.read_digits(&mut text);
        }

        if matches!(self.input.peek(), Some('e' | 'E')) {
            // Only commit to an exponent when digits follow; "1e" is not a number.
            let mut lookahead = self.input.clone();
            lookahead.next();
            let sign = match lookahead.peek() {
                Some(&s @ ('+' | '-')) => {
                    lookahead.next();
                    Some(s)
                }
                _ => None,
            };
            if lookahead.peek().is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                text.push('e');
                self.input.next();
                if let Some(s) = sign {
                    text.push(s);
                    self.input.next();
                }
                self.read_digits(&mut text);
            }
        }

        if text == "." {
            return Token::Illegal('.');
        }

        if !is_float {
            if let Ok(n) = text.parse::<i128>() {
                return Token::Integer(n);
            }
        }
        match text.parse::<f64>() {
            Ok(n) => Token::Float(n),
            Err(_) => Token::Illegal(first_char),
        }
    }

    fn read_digits(&mut self, text: &mut String) {
        while let Some(&ch) = self.input.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            text.push(ch);
            self.input.next();
        }
    }

    fn read_ident(&mut self, first_char: char) -> Token {
        let mut ident = String::from(first_char);
        while let Some(&ch) = self.input.peek() {
            if !(ch.is_alphanumeric() || ch == '_') {
                break;
            }
            ident.push(ch);
            self.input.next();
        }
        Token::Ident(ident)
    }
}

/// Lex the whole input, including the trailing [`Token::Eof`].
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token == Token::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
