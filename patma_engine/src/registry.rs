//! The class-shape registry.
//!
//! Positional class patterns need to know which attribute each position
//! refers to. A matchable type declares that order once, before matching
//! starts; the registry is read-only from then on. Registration after
//! matching has begun is not forbidden by the lock, but the intended
//! lifecycle is populate-then-match.
//!
//! Built-in type names (`int`, `str`, `list`, ...) are not registered
//! here: they have an implicit one-slot shape that destructures the value
//! itself, handled directly by the matcher.

use parking_lot::RwLock;
use patma_core::{PatmaError, PatmaResult};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Maps a type name to its ordered positional attribute names.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    shapes: RwLock<FxHashMap<Arc<str>, Arc<[Arc<str>]>>>,
}

impl ShapeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the positional attribute order for a type.
    ///
    /// Registering the same type again replaces the previous shape.
    pub fn register(&self, type_name: &str, attrs: &[&str]) {
        log::debug!("registering shape {type_name}{attrs:?}");
        let shape: Arc<[Arc<str>]> = attrs.iter().map(|a| Arc::from(*a)).collect();
        self.shapes.write().insert(Arc::from(type_name), shape);
    }

    /// Look up the positional attribute order for a type.
    ///
    /// # Errors
    ///
    /// [`PatmaError::NotRegistered`]: using an unregistered type
    /// positionally is a configuration defect, distinct from an ordinary
    /// no-match.
    pub fn lookup(&self, type_name: &str) -> PatmaResult<Arc<[Arc<str>]>> {
        self.shapes
            .read()
            .get(type_name)
            .map(Arc::clone)
            .ok_or_else(|| PatmaError::NotRegistered {
                type_name: Arc::from(type_name),
            })
    }

    /// Check whether a type has a registered shape.
    #[must_use]
    pub fn is_registered(&self, type_name: &str) -> bool {
        self.shapes.read().contains_key(type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let registry = ShapeRegistry::new();
        registry.register("Click", &["position", "button"]);
        let shape = registry.lookup("Click").expect("registered");
        assert_eq!(&*shape[0], "position");
        assert_eq!(&*shape[1], "button");
    }

    #[test]
    fn test_lookup_unregistered() {
        let registry = ShapeRegistry::new();
        assert_eq!(
            registry.lookup("Ghost").unwrap_err(),
            PatmaError::NotRegistered {
                type_name: "Ghost".into()
            }
        );
        assert!(!registry.is_registered("Ghost"));
    }

    #[test]
    fn test_reregistration_replaces() {
        let registry = ShapeRegistry::new();
        registry.register("Point", &["x", "y"]);
        registry.register("Point", &["y", "x"]);
        let shape = registry.lookup("Point").expect("registered");
        assert_eq!(&*shape[0], "y");
    }
}
