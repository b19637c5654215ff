//! Nominal types and attribute-bearing instances.
//!
//! Class patterns need two capabilities from a subject: a subtype-inclusive
//! type check and attribute lookup by name. [`TypeDesc`] supplies the
//! former via a single-inheritance base chain; [`Instance`] supplies the
//! latter via an attribute map. Both are host-constructed and immutable
//! once built.

use crate::value::Value;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// A nominal type descriptor with an optional base type.
#[derive(Debug)]
pub struct TypeDesc {
    name: Arc<str>,
    base: Option<Arc<TypeDesc>>,
}

impl TypeDesc {
    /// Create a root type with no base.
    #[must_use]
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: Arc::from(name),
            base: None,
        })
    }

    /// Create a subtype of `base`.
    #[must_use]
    pub fn with_base(name: &str, base: &Arc<TypeDesc>) -> Arc<Self> {
        Arc::new(Self {
            name: Arc::from(name),
            base: Some(Arc::clone(base)),
        })
    }

    /// The type's name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether this type is `name` or has `name` anywhere in its
    /// base chain.
    #[must_use]
    pub fn is_subtype_of(&self, name: &str) -> bool {
        let mut cursor = Some(self);
        while let Some(ty) = cursor {
            if &*ty.name == name {
                return true;
            }
            cursor = ty.base.as_deref();
        }
        false
    }
}

/// An instance of a [`TypeDesc`] carrying named attributes.
#[derive(Debug)]
pub struct Instance {
    ty: Arc<TypeDesc>,
    attrs: FxHashMap<Arc<str>, Value>,
}

impl Instance {
    /// Build an instance with the given attributes.
    #[must_use]
    pub fn new<'a>(
        ty: &Arc<TypeDesc>,
        attrs: impl IntoIterator<Item = (&'a str, Value)>,
    ) -> Arc<Self> {
        Arc::new(Self {
            ty: Arc::clone(ty),
            attrs: attrs
                .into_iter()
                .map(|(name, value)| (Arc::from(name), value))
                .collect(),
        })
    }

    /// The instance's runtime type.
    #[inline]
    #[must_use]
    pub fn ty(&self) -> &TypeDesc {
        &self.ty
    }

    /// Fetch an attribute by name.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<Value> {
        self.attrs.get(name).cloned()
    }
}
