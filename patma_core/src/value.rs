//! Dynamic subject values with deep structural equality.
//!
//! The matcher never inspects host data directly; subjects are represented
//! as [`Value`], a tagged enum covering the shapes the pattern language can
//! destructure:
//!
//! - scalars: none, booleans, integers, floats, strings
//! - `Seq`: an ordered, finite sequence of values
//! - `Map`: an insertion-ordered mapping with hashable literal keys
//! - `Instance`: an attribute-bearing object with a nominal type
//!
//! All variants are cheap to clone (`Arc` payloads), so a successful match
//! can hand sub-values to the caller without copying subject data.

use crate::object::Instance;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// A dynamic value tested against patterns.
#[derive(Clone, Debug)]
pub enum Value {
    /// The none value.
    None,
    /// A boolean. Distinct from `Int` for both equality and class checks.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// An immutable string. Strings are scalars here: they never match
    /// sequence patterns.
    Str(Arc<str>),
    /// An ordered, finite sequence.
    Seq(Arc<[Value]>),
    /// A key/value mapping.
    Map(Arc<ValueMap>),
    /// An attribute-bearing instance of a registered or ad-hoc type.
    Instance(Arc<Instance>),
}

impl Value {
    /// Build a string value.
    #[must_use]
    pub fn str(s: &str) -> Self {
        Self::Str(Arc::from(s))
    }

    /// Build a sequence value.
    #[must_use]
    pub fn seq(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Seq(items.into_iter().collect())
    }

    /// Build a mapping value.
    #[must_use]
    pub fn map(entries: impl IntoIterator<Item = (MapKey, Value)>) -> Self {
        Self::Map(Arc::new(entries.into_iter().collect()))
    }

    /// The value's dynamic type name, as used by class patterns.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::None => "NoneType",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Seq(_) => "list",
            Self::Map(_) => "dict",
            Self::Instance(inst) => inst.ty().name(),
        }
    }

    /// Nominal type check used by class patterns.
    ///
    /// Instances walk their base chain (subtype-inclusive); built-in
    /// values answer their exact tag name. `list` and `tuple` are both
    /// accepted for sequences, since the engine does not distinguish the
    /// two shapes.
    #[must_use]
    pub fn is_instance_of(&self, type_name: &str) -> bool {
        match self {
            Self::Instance(inst) => inst.ty().is_subtype_of(type_name),
            Self::Seq(_) => type_name == "list" || type_name == "tuple",
            _ => self.type_name() == type_name,
        }
    }

    /// View the value as a sequence, if it is one.
    #[inline]
    #[must_use]
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// View the value as a mapping, if it is one.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Fetch an attribute by name. Only instances carry attributes.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<Value> {
        match self {
            Self::Instance(inst) => inst.get_attr(name),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    /// Deep structural equality.
    ///
    /// Integers and floats compare numerically across the two variants
    /// (`1 == 1.0`); booleans and none compare by identity; sequences
    /// element-wise; mappings by key set and per-key value; instances by
    /// reference identity.
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                *a as f64 == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Instance(a), Value::Instance(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::str(s)
    }
}

impl From<Arc<Instance>> for Value {
    fn from(inst: Arc<Instance>) -> Self {
        Self::Instance(inst)
    }
}

// =============================================================================
// Mapping keys
// =============================================================================

/// The hashable subset of values usable as mapping keys.
///
/// Mapping patterns only admit literal keys, so the key space is closed:
/// none, booleans, integers, and strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MapKey {
    /// The none key.
    None,
    /// A boolean key.
    Bool(bool),
    /// An integer key.
    Int(i64),
    /// A string key.
    Str(Arc<str>),
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i64> for MapKey {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        Self::Str(Arc::from(s))
    }
}

// =============================================================================
// Value mapping
// =============================================================================

/// An insertion-ordered `MapKey → Value` mapping.
///
/// Entries keep their insertion order for iteration (so a `**rest` binding
/// reads naturally), with a hash index for O(1) lookup.
#[derive(Clone, Debug, Default)]
pub struct ValueMap {
    entries: Vec<(MapKey, Value)>,
    index: FxHashMap<MapKey, usize>,
}

impl ValueMap {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair, replacing any existing entry for the key.
    pub fn insert(&mut self, key: MapKey, value: Value) {
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1 = value;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
        }
    }

    /// Look up a key.
    #[must_use]
    pub fn get(&self, key: &MapKey) -> Option<&Value> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Check if a key is present.
    #[must_use]
    pub fn contains_key(&self, key: &MapKey) -> bool {
        self.index.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&MapKey, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl PartialEq for ValueMap {
    /// Order-insensitive: same key set, equal value per key.
    fn eq(&self, other: &ValueMap) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl FromIterator<(MapKey, Value)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (MapKey, Value)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
