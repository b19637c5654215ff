//! The immutable pattern AST.
//!
//! Compiled patterns are pure data: no interior mutability, no spans, no
//! references into the source text. Two compilations of the same text
//! produce equal values, and the whole tree is `Eq + Hash`, so callers can
//! cache and share compiled patterns freely (see the engine's pattern
//! cache).

use patma_core::MapKey;
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A compiled structural pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// `_`: matches anything, binds nothing.
    Wildcard,

    /// A bare name: matches anything, binds the name to the subject.
    Capture(Arc<str>),

    /// A literal: matches by deep structural equality, binds nothing.
    Literal(Const),

    /// A dotted name resolved in the match-call environment, then compared
    /// like a literal. Resolution is deferred to match time because the
    /// environment is call-scoped.
    ValueRef(DottedPath),

    /// `p := name`: matches if `p` matches, additionally binding `name`
    /// to the whole subject.
    As {
        /// The inner pattern.
        pattern: Box<Pattern>,
        /// The name bound to the whole subject.
        name: Arc<str>,
    },

    /// `a | b | ...`: alternatives tried left to right, first match wins.
    /// All alternatives bind the same capture-name set (validated at
    /// compile time).
    Or(Vec<Pattern>),

    /// `(a, b)` / `[a, *rest, b]`: an ordered sequence.
    Sequence {
        /// Element subpatterns, in order. If `star` is set, the element at
        /// that index is the rest element (a capture or a wildcard).
        elements: Vec<Pattern>,
        /// Index of the starred element, if any.
        star: Option<usize>,
    },

    /// `{key: p, ..., **rest}`: a mapping with literal keys.
    Mapping {
        /// Listed keys and their subpatterns. Keys are unique.
        entries: Vec<(MapKey, Pattern)>,
        /// Name capturing the unlisted key/value pairs, if present.
        rest: Option<Arc<str>>,
    },

    /// `Name(p, ..., attr=p, ...)`: a class destructure.
    Class {
        /// The type name checked against the subject (subtype-inclusive).
        name: Arc<str>,
        /// Positional subpatterns, resolved to attribute names through the
        /// shape registry at match time.
        positional: Vec<Pattern>,
        /// Keyword subpatterns, matched against named attributes.
        keyword: Vec<(Arc<str>, Pattern)>,
    },
}

impl Pattern {
    /// True for patterns that match any subject unconditionally.
    #[must_use]
    pub fn is_irrefutable(&self) -> bool {
        match self {
            Self::Wildcard | Self::Capture(_) => true,
            Self::As { pattern, .. } => pattern.is_irrefutable(),
            Self::Or(alts) => alts.iter().any(Pattern::is_irrefutable),
            _ => false,
        }
    }
}

/// A literal constant appearing in a pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum Const {
    /// `None`
    None,
    /// `True` / `False`
    Bool(bool),
    /// An integer literal.
    Int(i64),
    /// A float literal.
    Float(f64),
    /// A string literal.
    Str(Arc<str>),
}

// The grammar cannot produce a NaN literal, so `PartialEq` is total here.
impl Eq for Const {}

impl Hash for Const {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::None => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(i) => i.hash(state),
            Self::Float(n) => n.to_bits().hash(state),
            Self::Str(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

/// A dotted name like `Color.RED`, resolved at match time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DottedPath {
    segments: SmallVec<[Arc<str>; 4]>,
}

impl DottedPath {
    /// Build a path from its segments. At least two segments: a bare name
    /// is a capture, not a value reference.
    #[must_use]
    pub fn new(segments: impl IntoIterator<Item = Arc<str>>) -> Self {
        let segments: SmallVec<[Arc<str>; 4]> = segments.into_iter().collect();
        debug_assert!(segments.len() >= 2);
        Self { segments }
    }

    /// The leading segment, looked up in the name environment.
    #[must_use]
    pub fn head(&self) -> &str {
        &self.segments[0]
    }

    /// The remaining segments, resolved as attribute accesses.
    pub fn tail(&self) -> impl Iterator<Item = &str> {
        self.segments[1..].iter().map(|s| &**s)
    }
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_is_hashable_and_comparable() {
        use std::collections::HashSet;
        let a = Pattern::Sequence {
            elements: vec![Pattern::Capture("x".into()), Pattern::Literal(Const::Float(1.5))],
            star: None,
        };
        let b = a.clone();
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_irrefutable() {
        assert!(Pattern::Wildcard.is_irrefutable());
        assert!(Pattern::Capture("x".into()).is_irrefutable());
        assert!(!Pattern::Literal(Const::Int(0)).is_irrefutable());
        let or = Pattern::Or(vec![Pattern::Literal(Const::Int(0)), Pattern::Wildcard]);
        assert!(or.is_irrefutable());
    }

    #[test]
    fn test_dotted_path_display() {
        let path = DottedPath::new(["Color".into(), "RED".into()]);
        assert_eq!(path.to_string(), "Color.RED");
        assert_eq!(path.head(), "Color");
        assert_eq!(path.tail().collect::<Vec<_>>(), vec!["RED"]);
    }
}
