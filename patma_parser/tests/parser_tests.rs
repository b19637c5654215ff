//! Test suite for pattern compilation.
//!
//! Covers the full grammar and the compile-time rejections:
//! - literal, wildcard, capture, and value-reference atoms
//! - as-patterns (`:=`) and or-patterns (`|`)
//! - sequence patterns, grouping vs. one-element sequences, star elements
//! - mapping patterns with `**rest`
//! - class patterns, positional and keyword
//! - syntax errors with positions, binding conflicts, or-capture mismatches

use patma_core::{MapKey, PatmaError};
use patma_parser::{compile, Const, Pattern};
use pretty_assertions::assert_eq;

fn cap(name: &str) -> Pattern {
    Pattern::Capture(name.into())
}

fn lit(c: Const) -> Pattern {
    Pattern::Literal(c)
}

// ============================================================================
// Atoms
// ============================================================================

mod atoms {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_literals() {
        assert_eq!(compile("42"), Ok(lit(Const::Int(42))));
        assert_eq!(compile("-7"), Ok(lit(Const::Int(-7))));
        assert_eq!(compile("2.5"), Ok(lit(Const::Float(2.5))));
        assert_eq!(compile("-0.5"), Ok(lit(Const::Float(-0.5))));
        assert_eq!(compile("\"hi\""), Ok(lit(Const::Str("hi".into()))));
        assert_eq!(compile("'hi'"), Ok(lit(Const::Str("hi".into()))));
        assert_eq!(compile("True"), Ok(lit(Const::Bool(true))));
        assert_eq!(compile("False"), Ok(lit(Const::Bool(false))));
        assert_eq!(compile("None"), Ok(lit(Const::None)));
    }

    #[test]
    fn test_wildcard_and_capture() {
        assert_eq!(compile("_"), Ok(Pattern::Wildcard));
        assert_eq!(compile("x"), Ok(cap("x")));
        assert_eq!(compile("some_name"), Ok(cap("some_name")));
    }

    #[test]
    fn test_value_reference() {
        let Ok(Pattern::ValueRef(path)) = compile("Color.RED") else {
            panic!("expected a value reference");
        };
        assert_eq!(path.to_string(), "Color.RED");

        let Ok(Pattern::ValueRef(path)) = compile("mod.Color.RED") else {
            panic!("expected a value reference");
        };
        assert_eq!(path.to_string(), "mod.Color.RED");
    }

    #[test]
    fn test_group_is_transparent() {
        assert_eq!(compile("(x)"), Ok(cap("x")));
        assert_eq!(compile("((42))"), Ok(lit(Const::Int(42))));
    }
}

// ============================================================================
// As- and or-patterns
// ============================================================================

mod combinators {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_as_pattern() {
        assert_eq!(
            compile("42 := x"),
            Ok(Pattern::As {
                pattern: Box::new(lit(Const::Int(42))),
                name: "x".into(),
            })
        );
    }

    #[test]
    fn test_or_pattern() {
        assert_eq!(
            compile("1 | 2 | 3"),
            Ok(Pattern::Or(vec![
                lit(Const::Int(1)),
                lit(Const::Int(2)),
                lit(Const::Int(3)),
            ]))
        );
    }

    #[test]
    fn test_as_binds_tighter_than_or() {
        // `1 := x | 2 := x` is (1 := x) | (2 := x).
        assert_eq!(
            compile("1 := x | 2 := x"),
            Ok(Pattern::Or(vec![
                Pattern::As {
                    pattern: Box::new(lit(Const::Int(1))),
                    name: "x".into(),
                },
                Pattern::As {
                    pattern: Box::new(lit(Const::Int(2))),
                    name: "x".into(),
                },
            ]))
        );
    }

    #[test]
    fn test_as_with_wildcard_name_rejected() {
        assert!(compile("42 := _").is_err());
    }
}

// ============================================================================
// Sequence patterns
// ============================================================================

mod sequences {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixed_sequences() {
        let expected = Pattern::Sequence {
            elements: vec![cap("x"), cap("y")],
            star: None,
        };
        assert_eq!(compile("(x, y)"), Ok(expected.clone()));
        assert_eq!(compile("[x, y]"), Ok(expected));
    }

    #[test]
    fn test_one_element_sequences() {
        let expected = Pattern::Sequence {
            elements: vec![cap("x")],
            star: None,
        };
        assert_eq!(compile("(x,)"), Ok(expected.clone()));
        assert_eq!(compile("[x]"), Ok(expected));
    }

    #[test]
    fn test_empty_sequences() {
        let expected = Pattern::Sequence {
            elements: vec![],
            star: None,
        };
        assert_eq!(compile("()"), Ok(expected.clone()));
        assert_eq!(compile("[]"), Ok(expected));
    }

    #[test]
    fn test_trailing_comma() {
        assert_eq!(compile("[x, y,]"), compile("[x, y]"));
    }

    #[test]
    fn test_star_capture() {
        assert_eq!(
            compile("[first, *rest, last]"),
            Ok(Pattern::Sequence {
                elements: vec![cap("first"), cap("rest"), cap("last")],
                star: Some(1),
            })
        );
    }

    #[test]
    fn test_star_wildcard() {
        assert_eq!(
            compile("(x, *_)"),
            Ok(Pattern::Sequence {
                elements: vec![cap("x"), Pattern::Wildcard],
                star: Some(1),
            })
        );
    }

    #[test]
    fn test_leading_star() {
        assert_eq!(
            compile("[*init, last]"),
            Ok(Pattern::Sequence {
                elements: vec![cap("init"), cap("last")],
                star: Some(0),
            })
        );
    }

    #[test]
    fn test_two_stars_rejected() {
        let err = compile("[*a, *b]").unwrap_err();
        assert!(err
            .to_string()
            .contains("multiple starred names in sequence pattern"));
    }

    #[test]
    fn test_star_in_group_rejected() {
        assert!(compile("(*x)").is_err());
    }

    #[test]
    fn test_nested_sequences() {
        assert_eq!(
            compile("[[a, b], c]"),
            Ok(Pattern::Sequence {
                elements: vec![
                    Pattern::Sequence {
                        elements: vec![cap("a"), cap("b")],
                        star: None,
                    },
                    cap("c"),
                ],
                star: None,
            })
        );
    }
}

// ============================================================================
// Mapping patterns
// ============================================================================

mod mappings {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_mapping() {
        assert_eq!(
            compile("{\"key\": v}"),
            Ok(Pattern::Mapping {
                entries: vec![(MapKey::from("key"), cap("v"))],
                rest: None,
            })
        );
    }

    #[test]
    fn test_key_kinds() {
        assert_eq!(
            compile("{1: a, -2: b, True: c, None: d}"),
            Ok(Pattern::Mapping {
                entries: vec![
                    (MapKey::Int(1), cap("a")),
                    (MapKey::Int(-2), cap("b")),
                    (MapKey::Bool(true), cap("c")),
                    (MapKey::None, cap("d")),
                ],
                rest: None,
            })
        );
    }

    #[test]
    fn test_rest_capture() {
        assert_eq!(
            compile("{\"key\": v, **rest}"),
            Ok(Pattern::Mapping {
                entries: vec![(MapKey::from("key"), cap("v"))],
                rest: Some("rest".into()),
            })
        );
    }

    #[test]
    fn test_empty_mapping() {
        assert_eq!(
            compile("{}"),
            Ok(Pattern::Mapping {
                entries: vec![],
                rest: None,
            })
        );
    }

    #[test]
    fn test_rest_must_be_last() {
        assert!(compile("{**rest, \"key\": v}").is_err());
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = compile("{\"k\": a, \"k\": b}").unwrap_err();
        assert!(err.to_string().contains("duplicate key"));
    }

    #[test]
    fn test_float_key_rejected() {
        assert!(compile("{1.5: v}").is_err());
    }

    #[test]
    fn test_rest_wildcard_rejected() {
        assert!(compile("{**_}").is_err());
    }
}

// ============================================================================
// Class patterns
// ============================================================================

mod classes {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_positional() {
        assert_eq!(
            compile("Point(x, y)"),
            Ok(Pattern::Class {
                name: "Point".into(),
                positional: vec![cap("x"), cap("y")],
                keyword: vec![],
            })
        );
    }

    #[test]
    fn test_keyword() {
        assert_eq!(
            compile("Point(x=a, y=0)"),
            Ok(Pattern::Class {
                name: "Point".into(),
                positional: vec![],
                keyword: vec![("x".into(), cap("a")), ("y".into(), lit(Const::Int(0)))],
            })
        );
    }

    #[test]
    fn test_mixed() {
        assert_eq!(
            compile("Point(a, y=b)"),
            Ok(Pattern::Class {
                name: "Point".into(),
                positional: vec![cap("a")],
                keyword: vec![("y".into(), cap("b"))],
            })
        );
    }

    #[test]
    fn test_no_arguments() {
        assert_eq!(
            compile("Quit()"),
            Ok(Pattern::Class {
                name: "Quit".into(),
                positional: vec![],
                keyword: vec![],
            })
        );
    }

    #[test]
    fn test_nested_class_argument() {
        assert_eq!(
            compile("Line(Point(x1, y1), Point(x2, y2))"),
            Ok(Pattern::Class {
                name: "Line".into(),
                positional: vec![
                    Pattern::Class {
                        name: "Point".into(),
                        positional: vec![cap("x1"), cap("y1")],
                        keyword: vec![],
                    },
                    Pattern::Class {
                        name: "Point".into(),
                        positional: vec![cap("x2"), cap("y2")],
                        keyword: vec![],
                    },
                ],
                keyword: vec![],
            })
        );
    }

    #[test]
    fn test_positional_after_keyword_rejected() {
        let err = compile("Point(x=a, b)").unwrap_err();
        assert!(err
            .to_string()
            .contains("positional patterns follow keyword patterns"));
    }

    #[test]
    fn test_repeated_attribute_rejected() {
        let err = compile("Point(x=a, x=b)").unwrap_err();
        assert!(err.to_string().contains("attribute name repeated"));
    }

    #[test]
    fn test_wildcard_class_name_rejected() {
        assert!(compile("_(x)").is_err());
    }
}

// ============================================================================
// Compile-time rejections
// ============================================================================

mod rejections {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_syntax_error_reports_position() {
        let err = compile("(x, ").unwrap_err();
        let PatmaError::Syntax { message, span } = err else {
            panic!("expected a syntax error, got {err:?}");
        };
        assert!(message.contains("expected"));
        assert_eq!(span.start, 4);
    }

    #[test]
    fn test_trailing_input_rejected() {
        let err = compile("x y").unwrap_err();
        assert!(err.to_string().contains("expected end of pattern"));
    }

    #[test]
    fn test_duplicate_capture_in_sequence() {
        let err = compile("(x, x)").unwrap_err();
        assert_eq!(err, PatmaError::BindingConflict { name: "x".into() });
    }

    #[test]
    fn test_duplicate_capture_via_as() {
        let err = compile("(x,) := x").unwrap_err();
        assert_eq!(err, PatmaError::BindingConflict { name: "x".into() });
    }

    #[test]
    fn test_duplicate_capture_across_class_arguments() {
        let err = compile("Point(v, y=v)").unwrap_err();
        assert_eq!(err, PatmaError::BindingConflict { name: "v".into() });
    }

    #[test]
    fn test_duplicate_capture_with_mapping_rest() {
        let err = compile("{\"k\": rest, **rest}").unwrap_err();
        assert_eq!(err, PatmaError::BindingConflict { name: "rest".into() });
    }

    #[test]
    fn test_or_capture_mismatch_top_level() {
        let err = compile("x | y").unwrap_err();
        assert_eq!(
            err,
            PatmaError::OrCaptureMismatch {
                expected: vec!["x".into()],
                actual: vec!["y".into()],
            }
        );
    }

    #[test]
    fn test_or_capture_mismatch_nested() {
        // The offending or-pattern sits inside a sequence; the check still
        // fires during compilation.
        let err = compile("[(1 | b), c]").unwrap_err();
        assert_eq!(
            err,
            PatmaError::OrCaptureMismatch {
                expected: vec![],
                actual: vec!["b".into()],
            }
        );
    }

    #[test]
    fn test_or_with_equal_sets_accepted() {
        assert!(compile("(x, 0) | (0, x)").is_ok());
        assert!(compile("1 | 2 | 3").is_ok());
    }
}

// ============================================================================
// Determinism and reuse
// ============================================================================

#[test]
fn test_compilation_is_deterministic() {
    let a = compile("Point(x, y) | (x, y) := p").unwrap_err();
    let b = compile("Point(x, y) | (x, y) := p").unwrap_err();
    // Same text, same outcome, even for errors.
    assert_eq!(a, b);

    let a = compile("[first, *rest]").expect("valid pattern");
    let b = compile("[first, *rest]").expect("valid pattern");
    assert_eq!(a, b);
}
