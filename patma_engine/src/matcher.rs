//! The pattern matcher.
//!
//! [`try_match`] walks a compiled pattern against a subject value and
//! either produces a fresh set of bindings or reports a no-match. The
//! outcome is three-valued:
//!
//! - `Ok(Some(bindings))`: the pattern matched
//! - `Ok(None)`: ordinary structural mismatch (wrong type, wrong length,
//!   missing key, literal inequality); never an error, identical in shape
//!   no matter which pattern kind produced it
//! - `Err(..)`: a configuration defect, either a positional class pattern
//!   on an unregistered type or an unresolvable value reference
//!
//! Bindings from independent subpatterns are simply unioned; the compiler
//! already guarantees no name collisions outside or-patterns.

use crate::bindings::Bindings;
use crate::cache::PatternCache;
use crate::env::Env;
use crate::registry::ShapeRegistry;
use patma_core::{PatmaResult, Value, ValueMap};
use patma_parser::{Const, Pattern};
use std::sync::Arc;

/// Names with an implicit one-slot shape: a positional pattern on these
/// destructures the value itself rather than an attribute.
const BUILTIN_TYPE_NAMES: &[&str] = &[
    "NoneType", "bool", "int", "float", "str", "list", "tuple", "dict",
];

/// Match one pattern against one subject.
///
/// # Errors
///
/// [`PatmaError::NotRegistered`](patma_core::PatmaError::NotRegistered)
/// when a class pattern destructures an unregistered type positionally;
/// [`PatmaError::UnresolvedName`](patma_core::PatmaError::UnresolvedName)
/// when a value reference cannot be resolved in `env`. Every other
/// negative outcome is `Ok(None)`.
pub fn try_match(
    pattern: &Pattern,
    subject: &Value,
    registry: &ShapeRegistry,
    env: &Env,
) -> PatmaResult<Option<Bindings>> {
    let ctx = MatchContext { registry, env };
    let mut bindings = Bindings::new();
    if ctx.matches(pattern, subject, &mut bindings)? {
        Ok(Some(bindings))
    } else {
        Ok(None)
    }
}

/// Per-call state: the registry and environment references. Created fresh
/// for each [`try_match`] call, never retained.
struct MatchContext<'a> {
    registry: &'a ShapeRegistry,
    env: &'a Env,
}

impl MatchContext<'_> {
    /// Core recursion. On `Ok(true)` the captures of `pattern` have been
    /// added to `out`; on `Ok(false)` `out` may hold bindings from
    /// sub-matches that succeeded before the failure, and the caller
    /// discards them with the whole attempt.
    fn matches(&self, pattern: &Pattern, subject: &Value, out: &mut Bindings) -> PatmaResult<bool> {
        match pattern {
            Pattern::Wildcard => Ok(true),

            Pattern::Capture(name) => {
                out.insert(Arc::clone(name), subject.clone());
                Ok(true)
            }

            Pattern::Literal(constant) => Ok(const_eq(constant, subject)),

            Pattern::ValueRef(path) => {
                let resolved = self.env.resolve(path)?;
                Ok(resolved == *subject)
            }

            Pattern::As { pattern, name } => {
                if !self.matches(pattern, subject, out)? {
                    return Ok(false);
                }
                out.insert(Arc::clone(name), subject.clone());
                Ok(true)
            }

            Pattern::Or(alternatives) => {
                for alternative in alternatives {
                    // Scratch bindings per alternative: a failed try must
                    // not leak partial captures into the result.
                    let mut scratch = Bindings::new();
                    if self.matches(alternative, subject, &mut scratch)? {
                        out.absorb(scratch);
                        return Ok(true);
                    }
                }
                Ok(false)
            }

            Pattern::Sequence { elements, star } => {
                self.match_sequence(elements, *star, subject, out)
            }

            Pattern::Mapping { entries, rest } => {
                self.match_mapping(entries, rest.as_ref(), subject, out)
            }

            Pattern::Class {
                name,
                positional,
                keyword,
            } => self.match_class(name, positional, keyword, subject, out),
        }
    }

    fn match_sequence(
        &self,
        elements: &[Pattern],
        star: Option<usize>,
        subject: &Value,
        out: &mut Bindings,
    ) -> PatmaResult<bool> {
        let Some(items) = subject.as_seq() else {
            return Ok(false);
        };

        let Some(star) = star else {
            if items.len() != elements.len() {
                return Ok(false);
            }
            for (element, item) in elements.iter().zip(items) {
                if !self.matches(element, item, out)? {
                    return Ok(false);
                }
            }
            return Ok(true);
        };

        // One starred element: fixed prefix, greedy middle, fixed suffix.
        let fixed = elements.len() - 1;
        if items.len() < fixed {
            return Ok(false);
        }
        let suffix_len = fixed - star;
        let tail_start = items.len() - suffix_len;

        for (element, item) in elements[..star].iter().zip(&items[..star]) {
            if !self.matches(element, item, out)? {
                return Ok(false);
            }
        }
        // A `*_` element consumes the middle without binding it.
        if let Pattern::Capture(name) = &elements[star] {
            let middle: Arc<[Value]> = items[star..tail_start].iter().cloned().collect();
            out.insert(Arc::clone(name), Value::Seq(middle));
        }
        for (element, item) in elements[star + 1..].iter().zip(&items[tail_start..]) {
            if !self.matches(element, item, out)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn match_mapping(
        &self,
        entries: &[(patma_core::MapKey, Pattern)],
        rest: Option<&Arc<str>>,
        subject: &Value,
        out: &mut Bindings,
    ) -> PatmaResult<bool> {
        let Some(map) = subject.as_map() else {
            return Ok(false);
        };

        for (key, value_pattern) in entries {
            let Some(value) = map.get(key) else {
                return Ok(false);
            };
            if !self.matches(value_pattern, value, out)? {
                return Ok(false);
            }
        }

        if let Some(rest) = rest {
            // Shallow copy: remaining values keep their identity.
            let remaining: ValueMap = map
                .iter()
                .filter(|(key, _)| !entries.iter().any(|(listed, _)| listed == *key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            out.insert(Arc::clone(rest), Value::Map(Arc::new(remaining)));
        }
        Ok(true)
    }

    fn match_class(
        &self,
        name: &Arc<str>,
        positional: &[Pattern],
        keyword: &[(Arc<str>, Pattern)],
        subject: &Value,
        out: &mut Bindings,
    ) -> PatmaResult<bool> {
        let is_builtin = BUILTIN_TYPE_NAMES.contains(&&**name);

        // The registry check comes before the type test: destructuring an
        // unregistered type positionally is a programming mistake, and it
        // is reported no matter what subject happens to arrive.
        let shape = if positional.is_empty() || is_builtin {
            None
        } else {
            Some(self.registry.lookup(name)?)
        };

        if !subject.is_instance_of(name) {
            return Ok(false);
        }

        match shape {
            Some(shape) => {
                // "This type doesn't support that many positional
                // captures" is a legitimate non-match, not an error.
                if positional.len() > shape.len() {
                    return Ok(false);
                }
                for (sub, attr) in positional.iter().zip(shape.iter()) {
                    let Some(value) = subject.get_attr(attr) else {
                        return Ok(false);
                    };
                    if !self.matches(sub, &value, out)? {
                        return Ok(false);
                    }
                }
            }
            None if is_builtin && !positional.is_empty() => {
                // Implicit one-slot shape: the single positional pattern
                // destructures the value itself.
                if positional.len() > 1 {
                    return Ok(false);
                }
                if !self.matches(&positional[0], subject, out)? {
                    return Ok(false);
                }
            }
            None => {}
        }

        for (attr, sub) in keyword {
            let Some(value) = subject.get_attr(attr) else {
                return Ok(false);
            };
            if !self.matches(sub, &value, out)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Deep equality between a pattern literal and a subject value.
fn const_eq(constant: &Const, subject: &Value) -> bool {
    match (constant, subject) {
        (Const::None, Value::None) => true,
        (Const::Bool(a), Value::Bool(b)) => a == b,
        (Const::Int(a), Value::Int(b)) => a == b,
        (Const::Int(a), Value::Float(b)) => *a as f64 == *b,
        (Const::Float(a), Value::Float(b)) => a == b,
        (Const::Float(a), Value::Int(b)) => *a == *b as f64,
        (Const::Str(a), Value::Str(b)) => a == b,
        _ => false,
    }
}

// =============================================================================
// Matcher facade
// =============================================================================

/// A ready-to-use bundle of environment, registry, and pattern cache.
///
/// This is the portable front end of the original system: all accessible
/// names (constants, enums, classes) are declared up front, and each
/// `case` call compiles (with caching) and matches in one step. Fancier
/// skins like scope sniffing or namespace injection are host-specific
/// conveniences and intentionally absent.
///
/// ```
/// use patma_core::Value;
/// use patma_engine::{Env, Matcher};
///
/// let matcher = Matcher::new(Env::new());
/// let subject = Value::seq([Value::Int(10), Value::Int(20)]);
/// let bindings = matcher.case("(x, y)", &subject).unwrap().unwrap();
/// assert_eq!(bindings.get("x"), Some(&Value::Int(10)));
/// ```
#[derive(Debug, Default)]
pub struct Matcher {
    env: Env,
    registry: Arc<ShapeRegistry>,
    cache: PatternCache,
}

impl Matcher {
    /// Create a matcher with its own empty registry.
    #[must_use]
    pub fn new(env: Env) -> Self {
        Self {
            env,
            registry: Arc::new(ShapeRegistry::new()),
            cache: PatternCache::new(),
        }
    }

    /// Create a matcher sharing an existing registry.
    #[must_use]
    pub fn with_registry(env: Env, registry: Arc<ShapeRegistry>) -> Self {
        Self {
            env,
            registry,
            cache: PatternCache::new(),
        }
    }

    /// The matcher's shape registry, for registering matchable types.
    #[must_use]
    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    /// Compile `text` (cached) and match it against `subject`.
    ///
    /// # Errors
    ///
    /// Compile errors from the pattern text, plus the match-time
    /// configuration errors of [`try_match`].
    pub fn case(&self, text: &str, subject: &Value) -> PatmaResult<Option<Bindings>> {
        let pattern = self.cache.get_or_compile(text)?;
        try_match(&pattern, subject, &self.registry, &self.env)
    }
}
