//! Lexer for pattern source text.
//!
//! Pattern texts are short single expressions, so the lexer tokenizes the
//! whole input up front and hands the parser a finished token vector
//! (terminated by an `Eof` token). Spans are byte offsets into the text.

use crate::token::{Token, TokenKind};
use patma_core::{PatmaError, PatmaResult, Span};
use std::sync::Arc;

/// Tokenize a pattern text.
///
/// # Errors
///
/// Returns [`PatmaError::Syntax`] for unexpected characters, unterminated
/// strings, invalid escapes, and out-of-range integer literals.
pub fn tokenize(src: &str) -> PatmaResult<Vec<Token>> {
    let mut lexer = Lexer { src, pos: 0 };
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let at_end = token.kind == TokenKind::Eof;
        tokens.push(token);
        if at_end {
            return Ok(tokens);
        }
    }
}

struct Lexer<'src> {
    src: &'src str,
    pos: usize,
}

impl Lexer<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume `c` if it is next.
    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn next_token(&mut self) -> PatmaResult<Token> {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }

        let start = self.pos;
        let Some(c) = self.bump() else {
            return Ok(self.token(TokenKind::Eof, start));
        };

        let kind = match c {
            '|' => TokenKind::Pipe,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '-' => TokenKind::Minus,
            '=' => TokenKind::Equals,
            ':' => {
                if self.eat('=') {
                    TokenKind::Walrus
                } else {
                    TokenKind::Colon
                }
            }
            '*' => {
                if self.eat('*') {
                    TokenKind::DoubleStar
                } else {
                    TokenKind::Star
                }
            }
            '"' | '\'' => self.lex_string(c, start)?,
            c if c.is_ascii_digit() => self.lex_number(start)?,
            c if c == '_' || c.is_ascii_alphabetic() => self.lex_name(start),
            c => {
                return Err(PatmaError::syntax(
                    format!("unexpected character '{c}'"),
                    Span::new(start as u32, self.pos as u32),
                ));
            }
        };

        Ok(self.token(kind, start))
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            span: Span::new(start as u32, self.pos as u32),
        }
    }

    fn lex_name(&mut self, start: usize) -> TokenKind {
        while matches!(self.peek(), Some(c) if c == '_' || c.is_ascii_alphanumeric()) {
            self.bump();
        }
        match &self.src[start..self.pos] {
            "True" => TokenKind::True,
            "False" => TokenKind::False,
            "None" => TokenKind::None,
            name => TokenKind::Name(Arc::from(name)),
        }
    }

    fn lex_number(&mut self, start: usize) -> PatmaResult<TokenKind> {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }

        // Fraction: only if the dot is followed by a digit, so that a
        // dotted value reference after an integer stays a parse error
        // rather than silently lexing as a float.
        let mut is_float = false;
        if self.peek() == Some('.') {
            let after_dot = self.src[self.pos + 1..].chars().next();
            if matches!(after_dot, Some(c) if c.is_ascii_digit()) {
                is_float = true;
                self.bump();
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.bump();
                }
            }
        }

        // Exponent.
        if matches!(self.peek(), Some('e' | 'E')) {
            let mut lookahead = self.src[self.pos + 1..].chars();
            let mut exp_digit = lookahead.next();
            if matches!(exp_digit, Some('+' | '-')) {
                exp_digit = lookahead.next();
            }
            if matches!(exp_digit, Some(c) if c.is_ascii_digit()) {
                is_float = true;
                self.bump();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.bump();
                }
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.bump();
                }
            }
        }

        let text = &self.src[start..self.pos];
        let span = Span::new(start as u32, self.pos as u32);
        if is_float {
            let n = text
                .parse::<f64>()
                .map_err(|_| PatmaError::syntax(format!("invalid float literal '{text}'"), span))?;
            Ok(TokenKind::Float(n))
        } else {
            let i = text.parse::<i64>().map_err(|_| {
                PatmaError::syntax(format!("integer literal '{text}' out of range"), span)
            })?;
            Ok(TokenKind::Int(i))
        }
    }

    fn lex_string(&mut self, quote: char, start: usize) -> PatmaResult<TokenKind> {
        let mut text = String::new();
        loop {
            let span = Span::new(start as u32, self.pos as u32);
            match self.bump() {
                Option::None => {
                    return Err(PatmaError::syntax("unterminated string literal", span));
                }
                Some(c) if c == quote => break,
                Some('\\') => match self.bump() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('r') => text.push('\r'),
                    Some('0') => text.push('\0'),
                    Some(c @ ('\\' | '\'' | '"')) => text.push(c),
                    Some(c) => {
                        return Err(PatmaError::syntax(
                            format!("invalid escape sequence '\\{c}'"),
                            span,
                        ));
                    }
                    Option::None => {
                        return Err(PatmaError::syntax("unterminated string literal", span));
                    }
                },
                Some(c) => text.push(c),
            }
        }
        Ok(TokenKind::Str(Arc::from(text.as_str())))
    }
}
