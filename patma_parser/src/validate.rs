//! Static capture-set analysis.
//!
//! Two rules make a pattern unmatchable and are rejected here, at compile
//! time:
//!
//! - a capture name bound twice within one non-or subtree
//! - or-alternatives binding different capture-name sets
//!
//! Alternatives are always statically enumerable in this AST, so neither
//! check is ever deferred to match time.

use crate::ast::Pattern;
use patma_core::{PatmaError, PatmaResult};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Validate the binding structure of a compiled pattern.
///
/// # Errors
///
/// [`PatmaError::BindingConflict`] or [`PatmaError::OrCaptureMismatch`].
pub fn validate(pattern: &Pattern) -> PatmaResult<()> {
    capture_names(pattern).map(|_| ())
}

/// The set of names a successful match of `pattern` binds.
///
/// # Errors
///
/// Same as [`validate`]; the set is only well-defined for valid patterns.
pub fn capture_names(pattern: &Pattern) -> PatmaResult<FxHashSet<Arc<str>>> {
    match pattern {
        Pattern::Wildcard | Pattern::Literal(_) | Pattern::ValueRef(_) => {
            Ok(FxHashSet::default())
        }

        Pattern::Capture(name) => {
            let mut names = FxHashSet::default();
            names.insert(Arc::clone(name));
            Ok(names)
        }

        Pattern::As { pattern, name } => {
            let mut names = capture_names(pattern)?;
            insert_unique(&mut names, name)?;
            Ok(names)
        }

        Pattern::Or(alternatives) => {
            // The parser never produces an empty or-pattern, but the AST
            // is public, so treat one as binding nothing.
            let Some((head, tail)) = alternatives.split_first() else {
                return Ok(FxHashSet::default());
            };
            let first = capture_names(head)?;
            for alternative in tail {
                let other = capture_names(alternative)?;
                if other != first {
                    return Err(PatmaError::OrCaptureMismatch {
                        expected: sorted(&first),
                        actual: sorted(&other),
                    });
                }
            }
            Ok(first)
        }

        Pattern::Sequence { elements, .. } => {
            let mut names = FxHashSet::default();
            for element in elements {
                merge(&mut names, capture_names(element)?)?;
            }
            Ok(names)
        }

        Pattern::Mapping { entries, rest } => {
            let mut names = FxHashSet::default();
            for (_, value) in entries {
                merge(&mut names, capture_names(value)?)?;
            }
            if let Some(rest) = rest {
                insert_unique(&mut names, rest)?;
            }
            Ok(names)
        }

        Pattern::Class {
            positional,
            keyword,
            ..
        } => {
            let mut names = FxHashSet::default();
            for sub in positional {
                merge(&mut names, capture_names(sub)?)?;
            }
            for (_, sub) in keyword {
                merge(&mut names, capture_names(sub)?)?;
            }
            Ok(names)
        }
    }
}

fn insert_unique(names: &mut FxHashSet<Arc<str>>, name: &Arc<str>) -> PatmaResult<()> {
    if names.insert(Arc::clone(name)) {
        Ok(())
    } else {
        Err(PatmaError::BindingConflict {
            name: Arc::clone(name),
        })
    }
}

fn merge(into: &mut FxHashSet<Arc<str>>, from: FxHashSet<Arc<str>>) -> PatmaResult<()> {
    for name in from {
        if !into.insert(Arc::clone(&name)) {
            return Err(PatmaError::BindingConflict { name });
        }
    }
    Ok(())
}

fn sorted(names: &FxHashSet<Arc<str>>) -> Vec<String> {
    let mut out: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Const;

    fn cap(name: &str) -> Pattern {
        Pattern::Capture(name.into())
    }

    #[test]
    fn test_capture_names_of_nested_pattern() {
        let pattern = Pattern::Sequence {
            elements: vec![
                cap("x"),
                Pattern::As {
                    pattern: Box::new(Pattern::Literal(Const::Int(1))),
                    name: "y".into(),
                },
            ],
            star: None,
        };
        let names = capture_names(&pattern).expect("valid pattern");
        assert_eq!(names.len(), 2);
        assert!(names.contains("x") && names.contains("y"));
    }

    #[test]
    fn test_duplicate_capture_rejected() {
        let pattern = Pattern::Sequence {
            elements: vec![cap("x"), cap("x")],
            star: None,
        };
        let err = validate(&pattern).unwrap_err();
        assert_eq!(err, PatmaError::BindingConflict { name: "x".into() });
    }

    #[test]
    fn test_or_alternatives_may_repeat_names() {
        // Repeats *across* alternatives are the point of an or-pattern.
        let pattern = Pattern::Or(vec![cap("x"), cap("x")]);
        assert!(validate(&pattern).is_ok());
    }

    #[test]
    fn test_or_capture_mismatch_rejected() {
        let pattern = Pattern::Or(vec![cap("x"), cap("y")]);
        let err = validate(&pattern).unwrap_err();
        assert_eq!(
            err,
            PatmaError::OrCaptureMismatch {
                expected: vec!["x".into()],
                actual: vec!["y".into()],
            }
        );
    }
}
