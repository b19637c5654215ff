//! Recursive-descent parser for the pattern grammar.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! pattern     := or_pattern
//! or_pattern  := as_pattern ('|' as_pattern)*
//! as_pattern  := atom (':=' NAME)?
//! atom        := literal | '_' | NAME | NAME ('.' NAME)+ | class
//!              | sequence | mapping | '(' pattern ')'
//! class       := NAME '(' (pattern ',')* (NAME '=' pattern ',')* ')'
//! sequence    := '(' elements ')' | '[' elements ']'
//! mapping     := '{' (key ':' pattern ',')* ('**' NAME)? '}'
//! ```
//!
//! A parenthesized pattern with no comma is a group; a comma makes it a
//! sequence, and brackets always do. One sequence element may be starred
//! (`*name` or `*_`). Mapping keys are literals; `**rest` must come last.

use crate::ast::{Const, DottedPath, Pattern};
use crate::token::{Token, TokenKind};
use patma_core::{MapKey, PatmaError, PatmaResult, Span};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::sync::Arc;

/// Parse a token stream (as produced by [`crate::lexer::tokenize`]) into a
/// pattern. The stream must be terminated by an `Eof` token.
///
/// # Errors
///
/// Returns [`PatmaError::Syntax`] with the offending span on any grammar
/// violation.
pub fn parse(tokens: Vec<Token>) -> PatmaResult<Pattern> {
    debug_assert!(matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof));
    let mut parser = Parser { tokens, pos: 0 };
    let pattern = parser.parse_pattern()?;
    parser.expect(&TokenKind::Eof, "end of pattern")?;
    Ok(pattern)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    // =========================================================================
    // Token stream helpers
    // =========================================================================

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    /// Kind of the token after the current one.
    fn next_kind(&self) -> &TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(&TokenKind::Eof, |t| &t.kind)
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches `kind`.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> PatmaResult<Span> {
        if self.peek_kind() == kind {
            Ok(self.advance().span)
        } else {
            Err(self.expected(what))
        }
    }

    fn expect_name(&mut self, what: &str) -> PatmaResult<(Arc<str>, Span)> {
        match self.peek_kind() {
            TokenKind::Name(name) => {
                let name = Arc::clone(name);
                Ok((name, self.advance().span))
            }
            _ => Err(self.expected(what)),
        }
    }

    fn expected(&self, what: &str) -> PatmaError {
        PatmaError::syntax(
            format!("expected {what}, found {}", self.current().kind),
            self.current().span,
        )
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    fn parse_pattern(&mut self) -> PatmaResult<Pattern> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> PatmaResult<Pattern> {
        let first = self.parse_as()?;
        if self.peek_kind() != &TokenKind::Pipe {
            return Ok(first);
        }
        let mut alternatives = vec![first];
        while self.eat(&TokenKind::Pipe) {
            alternatives.push(self.parse_as()?);
        }
        Ok(Pattern::Or(alternatives))
    }

    fn parse_as(&mut self) -> PatmaResult<Pattern> {
        let atom = self.parse_atom()?;
        if !self.eat(&TokenKind::Walrus) {
            return Ok(atom);
        }
        let (name, span) = self.expect_name("a capture name after ':='")?;
        if &*name == "_" {
            return Err(PatmaError::syntax("cannot use '_' as a capture name", span));
        }
        Ok(Pattern::As {
            pattern: Box::new(atom),
            name,
        })
    }

    fn parse_atom(&mut self) -> PatmaResult<Pattern> {
        match self.peek_kind().clone() {
            TokenKind::Int(i) => {
                self.advance();
                Ok(Pattern::Literal(Const::Int(i)))
            }
            TokenKind::Float(n) => {
                self.advance();
                Ok(Pattern::Literal(Const::Float(n)))
            }
            TokenKind::Str(s) => {
                self.advance();
                Ok(Pattern::Literal(Const::Str(s)))
            }
            TokenKind::True => {
                self.advance();
                Ok(Pattern::Literal(Const::Bool(true)))
            }
            TokenKind::False => {
                self.advance();
                Ok(Pattern::Literal(Const::Bool(false)))
            }
            TokenKind::None => {
                self.advance();
                Ok(Pattern::Literal(Const::None))
            }
            TokenKind::Minus => {
                self.advance();
                match self.peek_kind().clone() {
                    TokenKind::Int(i) => {
                        self.advance();
                        Ok(Pattern::Literal(Const::Int(-i)))
                    }
                    TokenKind::Float(n) => {
                        self.advance();
                        Ok(Pattern::Literal(Const::Float(-n)))
                    }
                    _ => Err(self.expected("a number after '-'")),
                }
            }
            TokenKind::Name(name) => self.parse_name_pattern(name),
            TokenKind::LParen => self.parse_group_or_sequence(),
            TokenKind::LBracket => self.parse_bracket_sequence(),
            TokenKind::LBrace => self.parse_mapping(),
            _ => Err(self.expected("a pattern")),
        }
    }

    /// A bare name is a capture (`_` a wildcard), a dotted name a value
    /// reference, and a name followed by `(` a class pattern.
    fn parse_name_pattern(&mut self, name: Arc<str>) -> PatmaResult<Pattern> {
        let span = self.advance().span;
        if self.peek_kind() == &TokenKind::Dot {
            let mut segments: SmallVec<[Arc<str>; 4]> = SmallVec::new();
            segments.push(name);
            while self.eat(&TokenKind::Dot) {
                segments.push(self.expect_name("a name after '.'")?.0);
            }
            return Ok(Pattern::ValueRef(DottedPath::new(segments)));
        }
        if self.peek_kind() == &TokenKind::LParen {
            if &*name == "_" {
                return Err(PatmaError::syntax("cannot use '_' as a class name", span));
            }
            return self.parse_class(name);
        }
        if &*name == "_" {
            Ok(Pattern::Wildcard)
        } else {
            Ok(Pattern::Capture(name))
        }
    }

    fn parse_class(&mut self, name: Arc<str>) -> PatmaResult<Pattern> {
        self.advance(); // consume '('
        let mut positional = Vec::new();
        let mut keyword: Vec<(Arc<str>, Pattern)> = Vec::new();
        let mut seen_attrs: FxHashSet<Arc<str>> = FxHashSet::default();

        if !self.eat(&TokenKind::RParen) {
            loop {
                if matches!(self.peek_kind(), TokenKind::Name(_))
                    && self.next_kind() == &TokenKind::Equals
                {
                    let (attr, attr_span) = self.expect_name("an attribute name")?;
                    self.advance(); // consume '='
                    if !seen_attrs.insert(Arc::clone(&attr)) {
                        return Err(PatmaError::syntax(
                            format!("attribute name repeated in class pattern: '{attr}'"),
                            attr_span,
                        ));
                    }
                    let value = self.parse_pattern()?;
                    keyword.push((attr, value));
                } else {
                    if !keyword.is_empty() {
                        return Err(PatmaError::syntax(
                            "positional patterns follow keyword patterns",
                            self.current().span,
                        ));
                    }
                    positional.push(self.parse_pattern()?);
                }
                if self.eat(&TokenKind::Comma) {
                    if self.eat(&TokenKind::RParen) {
                        break;
                    }
                    continue;
                }
                self.expect(&TokenKind::RParen, "',' or ')' in class pattern")?;
                break;
            }
        }

        Ok(Pattern::Class {
            name,
            positional,
            keyword,
        })
    }

    /// `(p)` is a group; `()`, `(p,)`, and `(p, q)` are sequences.
    fn parse_group_or_sequence(&mut self) -> PatmaResult<Pattern> {
        self.advance(); // consume '('
        if self.eat(&TokenKind::RParen) {
            return Ok(Pattern::Sequence {
                elements: Vec::new(),
                star: None,
            });
        }
        let element_span = self.current().span;
        let (first, is_star) = self.parse_element()?;
        if self.peek_kind() == &TokenKind::Comma {
            return self.finish_sequence(
                vec![first],
                is_star.then_some(0),
                &TokenKind::RParen,
                "',' or ')' in sequence pattern",
            );
        }
        if is_star {
            return Err(PatmaError::syntax(
                "starred pattern is not allowed in a group",
                element_span,
            ));
        }
        self.expect(&TokenKind::RParen, "')' to close the group")?;
        Ok(first)
    }

    fn parse_bracket_sequence(&mut self) -> PatmaResult<Pattern> {
        self.advance(); // consume '['
        if self.eat(&TokenKind::RBracket) {
            return Ok(Pattern::Sequence {
                elements: Vec::new(),
                star: None,
            });
        }
        let (first, is_star) = self.parse_element()?;
        self.finish_sequence(
            vec![first],
            is_star.then_some(0),
            &TokenKind::RBracket,
            "',' or ']' in sequence pattern",
        )
    }

    /// Parse the remaining elements of a sequence whose first element has
    /// already been consumed.
    fn finish_sequence(
        &mut self,
        mut elements: Vec<Pattern>,
        mut star: Option<usize>,
        close: &TokenKind,
        expectation: &str,
    ) -> PatmaResult<Pattern> {
        loop {
            if !self.eat(&TokenKind::Comma) {
                self.expect(close, expectation)?;
                break;
            }
            if self.eat(close) {
                break; // trailing comma
            }
            let element_span = self.current().span;
            let (element, is_star) = self.parse_element()?;
            if is_star {
                if star.is_some() {
                    return Err(PatmaError::syntax(
                        "multiple starred names in sequence pattern",
                        element_span,
                    ));
                }
                star = Some(elements.len());
            }
            elements.push(element);
        }
        Ok(Pattern::Sequence { elements, star })
    }

    /// One sequence element: either `*name` / `*_`, or a full pattern.
    /// Returns the element and whether it was starred.
    fn parse_element(&mut self) -> PatmaResult<(Pattern, bool)> {
        if self.eat(&TokenKind::Star) {
            let (name, _) = self.expect_name("a name after '*'")?;
            let element = if &*name == "_" {
                Pattern::Wildcard
            } else {
                Pattern::Capture(name)
            };
            Ok((element, true))
        } else {
            Ok((self.parse_pattern()?, false))
        }
    }

    fn parse_mapping(&mut self) -> PatmaResult<Pattern> {
        self.advance(); // consume '{'
        let mut entries = Vec::new();
        let mut seen_keys: FxHashSet<MapKey> = FxHashSet::default();
        let mut rest = None;

        if !self.eat(&TokenKind::RBrace) {
            loop {
                if self.eat(&TokenKind::DoubleStar) {
                    let (name, span) = self.expect_name("a name after '**'")?;
                    if &*name == "_" {
                        return Err(PatmaError::syntax(
                            "cannot use '_' as a '**' target",
                            span,
                        ));
                    }
                    rest = Some(name);
                    self.eat(&TokenKind::Comma);
                    self.expect(&TokenKind::RBrace, "'}' after the '**' rest entry")?;
                    break;
                }
                let key_span = self.current().span;
                let key = self.parse_map_key()?;
                if !seen_keys.insert(key.clone()) {
                    return Err(PatmaError::syntax(
                        format!("duplicate key {key} in mapping pattern"),
                        key_span,
                    ));
                }
                self.expect(&TokenKind::Colon, "':' after mapping key")?;
                let value = self.parse_pattern()?;
                entries.push((key, value));
                if self.eat(&TokenKind::Comma) {
                    if self.eat(&TokenKind::RBrace) {
                        break;
                    }
                    continue;
                }
                self.expect(&TokenKind::RBrace, "',' or '}' in mapping pattern")?;
                break;
            }
        }

        Ok(Pattern::Mapping { entries, rest })
    }

    /// Mapping keys are restricted to hashable literals.
    fn parse_map_key(&mut self) -> PatmaResult<MapKey> {
        const KEY_KINDS: &str = "a literal key (None, bool, int, or string)";
        match self.peek_kind().clone() {
            TokenKind::Int(i) => {
                self.advance();
                Ok(MapKey::Int(i))
            }
            TokenKind::Str(s) => {
                self.advance();
                Ok(MapKey::Str(s))
            }
            TokenKind::True => {
                self.advance();
                Ok(MapKey::Bool(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(MapKey::Bool(false))
            }
            TokenKind::None => {
                self.advance();
                Ok(MapKey::None)
            }
            TokenKind::Minus => {
                self.advance();
                match self.peek_kind().clone() {
                    TokenKind::Int(i) => {
                        self.advance();
                        Ok(MapKey::Int(-i))
                    }
                    _ => Err(self.expected("an integer after '-'")),
                }
            }
            _ => Err(self.expected(KEY_KINDS)),
        }
    }
}
