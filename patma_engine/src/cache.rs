//! Compile-once cache for pattern text.
//!
//! Re-parsing a pattern per match call is wasted work: the AST is
//! immutable and shareable, so a given text only ever needs one
//! compilation. Compile errors are not cached: a failing text stays
//! cheap to report and the cache holds only usable patterns.

use parking_lot::RwLock;
use patma_core::PatmaResult;
use patma_parser::{compile, Pattern};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// A thread-safe pattern-text → compiled-pattern cache.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: RwLock<FxHashMap<Arc<str>, Arc<Pattern>>>,
}

impl PatternCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the compiled pattern for `text`, compiling on first use.
    ///
    /// # Errors
    ///
    /// Compilation errors propagate unchanged; nothing is cached for the
    /// failing text.
    pub fn get_or_compile(&self, text: &str) -> PatmaResult<Arc<Pattern>> {
        if let Some(pattern) = self.patterns.read().get(text) {
            return Ok(Arc::clone(pattern));
        }
        log::trace!("pattern cache miss, compiling {text:?}");
        let pattern = Arc::new(compile(text)?);
        let mut patterns = self.patterns.write();
        // A racing caller may have compiled the same text; keep one copy.
        Ok(Arc::clone(
            patterns.entry(Arc::from(text)).or_insert(pattern),
        ))
    }

    /// Number of cached patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.read().len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_reuses_compiled_patterns() {
        let cache = PatternCache::new();
        let a = cache.get_or_compile("(x, y)").expect("valid pattern");
        let b = cache.get_or_compile("(x, y)").expect("valid pattern");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = PatternCache::new();
        assert!(cache.get_or_compile("(x,").is_err());
        assert!(cache.is_empty());
    }
}
