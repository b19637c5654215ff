//! The match-call name environment.
//!
//! Value references (`Color.RED`) are left unresolved at compile time and
//! looked up here during each match call: the head of the dotted path is a
//! name in the environment, the remaining segments are attribute accesses
//! on the resolved value.

use patma_core::{PatmaError, PatmaResult, Value};
use patma_parser::DottedPath;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Names visible to value references during a match call.
#[derive(Clone, Debug, Default)]
pub struct Env {
    names: FxHashMap<Arc<str>, Value>,
}

impl Env {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name.
    pub fn bind(&mut self, name: &str, value: Value) {
        self.names.insert(Arc::from(name), value);
    }

    /// Look up a plain name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.names.get(name)
    }

    /// Resolve a dotted path to a value.
    ///
    /// # Errors
    ///
    /// [`PatmaError::UnresolvedName`] if the head name is absent or the
    /// attribute chain breaks. An unresolvable reference is a
    /// configuration defect, not a no-match.
    pub fn resolve(&self, path: &DottedPath) -> PatmaResult<Value> {
        let unresolved = || PatmaError::UnresolvedName {
            path: path.to_string(),
        };
        let mut value = self.names.get(path.head()).cloned().ok_or_else(unresolved)?;
        for attr in path.tail() {
            value = value.get_attr(attr).ok_or_else(unresolved)?;
        }
        Ok(value)
    }
}

impl<'a> FromIterator<(&'a str, Value)> for Env {
    fn from_iter<I: IntoIterator<Item = (&'a str, Value)>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|(name, value)| (Arc::from(name), value))
                .collect(),
        }
    }
}
