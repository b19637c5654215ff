//! Token model for the pattern grammar.

use patma_core::Span;
use std::fmt;
use std::sync::Arc;

/// A lexed token with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Where it sits in the pattern text.
    pub span: Span,
}

/// The kinds of token the pattern grammar uses.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// An identifier.
    Name(Arc<str>),
    /// An integer literal.
    Int(i64),
    /// A float literal.
    Float(f64),
    /// A string literal (quotes stripped, escapes resolved).
    Str(Arc<str>),
    /// `True`
    True,
    /// `False`
    False,
    /// `None`
    None,
    /// `|`
    Pipe,
    /// `:=`
    Walrus,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `=`
    Equals,
    /// `*`
    Star,
    /// `**`
    DoubleStar,
    /// `.`
    Dot,
    /// `-`
    Minus,
    /// End of input.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "name '{name}'"),
            Self::Int(i) => write!(f, "integer {i}"),
            Self::Float(n) => write!(f, "float {n}"),
            Self::Str(s) => write!(f, "string {s:?}"),
            Self::True => write!(f, "'True'"),
            Self::False => write!(f, "'False'"),
            Self::None => write!(f, "'None'"),
            Self::Pipe => write!(f, "'|'"),
            Self::Walrus => write!(f, "':='"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::LBracket => write!(f, "'['"),
            Self::RBracket => write!(f, "']'"),
            Self::LBrace => write!(f, "'{{'"),
            Self::RBrace => write!(f, "'}}'"),
            Self::Comma => write!(f, "','"),
            Self::Colon => write!(f, "':'"),
            Self::Equals => write!(f, "'='"),
            Self::Star => write!(f, "'*'"),
            Self::DoubleStar => write!(f, "'**'"),
            Self::Dot => write!(f, "'.'"),
            Self::Minus => write!(f, "'-'"),
            Self::Eof => write!(f, "end of pattern"),
        }
    }
}
