//! # Patma Engine
//!
//! The match-time half of patma:
//!
//! - [`try_match`]: walk a compiled pattern against a subject value,
//!   producing bindings or a no-match
//! - [`ShapeRegistry`]: type name → positional attribute order, the
//!   destructuring shape a matchable type declares
//! - [`Env`]: the call-scoped name environment value references resolve
//!   against
//! - [`PatternCache`]: compile-once cache keyed by pattern text
//! - [`Matcher`]: a convenience facade bundling all of the above
//!
//! Matching is a pure, bounded traversal: no I/O, no suspension points.
//! Compiled patterns are immutable and freely shared across threads; the
//! registry and cache are lock-protected so the intended lifecycle
//! (populate once, then match concurrently) needs no external
//! synchronization.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bindings;
pub mod cache;
pub mod env;
pub mod matcher;
pub mod registry;

pub use bindings::Bindings;
pub use cache::PatternCache;
pub use env::Env;
pub use matcher::{try_match, Matcher};
pub use registry::ShapeRegistry;
