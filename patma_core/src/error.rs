//! Error types and result definitions for patma.
//!
//! The error taxonomy follows the phases of the engine:
//! - Compile-time structural errors (malformed syntax, duplicate captures,
//!   mismatched or-alternative capture sets): the pattern itself is
//!   unmatchable and compilation is aborted
//! - Match-time configuration errors (unregistered positional type,
//!   unresolvable value reference): the call is misconfigured and aborted
//!
//! An ordinary structural mismatch is **not** an error: the matcher
//! reports it as a plain no-match outcome and the caller moves on to the
//! next pattern in its chain.

use crate::span::Span;
use std::sync::Arc;
use thiserror::Error;

/// The unified result type used throughout patma.
pub type PatmaResult<T> = Result<T, PatmaError>;

/// All error conditions the compiler and matcher can report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatmaError {
    /// Malformed pattern text.
    #[error("SyntaxError: {message} ({span})")]
    Syntax {
        /// What went wrong, including what was expected.
        message: String,
        /// Source location in the pattern text.
        span: Span,
    },

    /// The same capture name is bound twice within one non-or subtree.
    #[error("BindingError: multiple assignments to name '{name}' in pattern")]
    BindingConflict {
        /// The name bound more than once.
        name: Arc<str>,
    },

    /// Alternatives of an or-pattern bind different capture-name sets.
    #[error(
        "BindingError: alternative patterns bind different names (expected [{}], got [{}])",
        expected.join(", "),
        actual.join(", ")
    )]
    OrCaptureMismatch {
        /// Names bound by the first alternative, sorted.
        expected: Vec<String>,
        /// Names bound by the offending alternative, sorted.
        actual: Vec<String>,
    },

    /// A class pattern destructures a type positionally, but the type was
    /// never registered with the shape registry.
    #[error("RegistryError: type '{type_name}' has no registered positional attributes")]
    NotRegistered {
        /// The unregistered type name.
        type_name: Arc<str>,
    },

    /// A value reference could not be resolved in the name environment.
    #[error("NameError: name '{path}' is not defined")]
    UnresolvedName {
        /// The dotted path that failed to resolve.
        path: String,
    },
}

impl PatmaError {
    /// Create a syntax error at the given span.
    #[must_use]
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::Syntax {
            message: message.into(),
            span,
        }
    }

    /// True for errors produced while compiling a pattern, as opposed to
    /// errors produced during a match call.
    #[must_use]
    pub fn is_compile_error(&self) -> bool {
        matches!(
            self,
            Self::Syntax { .. } | Self::BindingConflict { .. } | Self::OrCaptureMismatch { .. }
        )
    }
}
