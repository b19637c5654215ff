//! Capture bindings produced by a successful match.

use patma_core::Value;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// A mapping from capture name to bound value.
///
/// Keys are unique by construction: the compiler rejects patterns that
/// would bind a name twice, so the matcher can union bindings from
/// independent subpatterns without collision checks. A fresh `Bindings`
/// is produced per successful match and owned by the caller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings {
    map: FxHashMap<Arc<str>, Value>,
}

impl Bindings {
    /// Create an empty binding set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a bound value by capture name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.map.get(name)
    }

    /// Check whether a name is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if no names are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over the bound names and values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.map.iter().map(|(name, value)| (&**name, value))
    }

    pub(crate) fn insert(&mut self, name: Arc<str>, value: Value) {
        self.map.insert(name, value);
    }

    pub(crate) fn absorb(&mut self, other: Bindings) {
        self.map.extend(other.map);
    }
}

impl<'a> FromIterator<(&'a str, Value)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (&'a str, Value)>>(iter: I) -> Self {
        Self {
            map: iter
                .into_iter()
                .map(|(name, value)| (Arc::from(name), value))
                .collect(),
        }
    }
}
