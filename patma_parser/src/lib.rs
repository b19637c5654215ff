//! # Patma Parser
//!
//! The pattern compiler: turns pattern source text into an immutable
//! [`Pattern`] AST, rejecting unmatchable patterns eagerly.
//!
//! Pipeline:
//!
//! 1. [`lexer`]: tokenizes the text (spans are byte offsets)
//! 2. [`parser`]: recursive descent over the token stream
//! 3. [`validate`]: capture-set analysis; duplicate bindings and
//!    or-alternative mismatches are compile errors, never runtime surprises
//!
//! The compiled AST is pure data: structurally comparable, hashable, and
//! freely shared across threads and repeated match calls.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod validate;

pub use ast::{Const, DottedPath, Pattern};

use patma_core::PatmaResult;

/// Compile pattern text into a validated [`Pattern`].
///
/// # Errors
///
/// - [`PatmaError::Syntax`](patma_core::PatmaError::Syntax) for malformed
///   text
/// - [`PatmaError::BindingConflict`](patma_core::PatmaError::BindingConflict)
///   when a capture name is bound twice in one non-or subtree
/// - [`PatmaError::OrCaptureMismatch`](patma_core::PatmaError::OrCaptureMismatch)
///   when or-alternatives bind different name sets
pub fn compile(text: &str) -> PatmaResult<Pattern> {
    let tokens = lexer::tokenize(text)?;
    let pattern = parser::parse(tokens)?;
    validate::validate(&pattern)?;
    Ok(pattern)
}
