//! # Patma Core
//!
//! Foundation types shared by the pattern compiler and the matcher:
//!
//! - **Value Model**: a tagged representation of dynamic subject values
//!   with deep structural equality
//! - **Object Model**: nominal type descriptors and attribute-bearing
//!   instances for class-pattern destructuring
//! - **Spans**: byte offset ranges for parse error reporting
//! - **Error Handling**: the unified result and error definitions

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod object;
pub mod span;
pub mod value;

pub use error::{PatmaError, PatmaResult};
pub use object::{Instance, TypeDesc};
pub use span::Span;
pub use value::{MapKey, Value, ValueMap};

/// Patma version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
