//! Value model read by the hasher: values, property keys, objects, symbols.
//!
//! Objects and symbols live in arenas (see [`HeapStore`](crate::store::HeapStore))
//! and are addressed by identity tokens. Two tokens are equal only if they
//! name the same arena slot, never because their contents match.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use safe_bump::Idx;

// ---------------------------------------------------------------------------
// Identity tokens
// ---------------------------------------------------------------------------

/// Identity of an object slot in a heap.
pub struct ObjectId(Idx<Object>);

/// Identity of a symbol slot in a heap.
pub struct SymbolId(Idx<Symbol>);

macro_rules! identity_token {
    ($name:ident, $target:ty, $prefix:literal) => {
        impl $name {
            /// Wraps a raw arena index.
            #[must_use]
            pub const fn from_idx(idx: Idx<$target>) -> Self {
                Self(idx)
            }

            /// Returns the underlying arena index.
            #[must_use]
            pub const fn idx(self) -> Idx<$target> {
                self.0
            }

            /// Returns the raw slot number.
            #[must_use]
            pub const fn raw(self) -> usize {
                self.0.into_raw()
            }
        }

        // Manual impls: `Idx<T>` is compared by slot number only, without
        // requiring anything of `T`.

        impl Clone for $name {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl Copy for $name {}

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.raw() == other.raw()
            }
        }

        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.raw().cmp(&other.raw())
            }
        }

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.raw().hash(state);
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.raw())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}

identity_token!(ObjectId, Object, "object");
identity_token!(SymbolId, Symbol, "symbol");

/// Any identity the cache can hold an entry for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    /// An object slot (ordinary object, function or composite).
    Object(ObjectId),
    /// A symbol slot.
    Symbol(SymbolId),
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(id) => fmt::Display::fmt(id, f),
            Self::Symbol(id) => fmt::Display::fmt(id, f),
        }
    }
}

impl From<ObjectId> for Identity {
    fn from(id: ObjectId) -> Self {
        Self::Object(id)
    }
}

impl From<SymbolId> for Identity {
    fn from(id: SymbolId) -> Self {
        Self::Symbol(id)
    }
}

// ---------------------------------------------------------------------------
// Values and keys
// ---------------------------------------------------------------------------

/// A value bound to a composite property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The `undefined` primitive.
    Undefined,
    /// The `null` primitive.
    Null,
    /// A boolean primitive.
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// An arbitrary-precision integer, hashed as its nearest `f64`.
    BigInt(i128),
    /// A string primitive.
    String(String),
    /// A symbol, by identity.
    Symbol(SymbolId),
    /// An object, function or composite, by identity.
    Object(ObjectId),
    /// A host value kind the hasher does not recognize.
    Exotic(&'static str),
}

impl Value {
    /// Returns a short name for the value's kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::BigInt(_) => "bigint",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Object(_) => "object",
            Self::Exotic(kind) => *kind,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Self::Object(id)
    }
}

impl From<SymbolId> for Value {
    fn from(id: SymbolId) -> Self {
        Self::Symbol(id)
    }
}

/// An own-property key: a string or a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// String key.
    String(String),
    /// Symbol key, by identity.
    Symbol(SymbolId),
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<SymbolId> for PropertyKey {
    fn from(id: SymbolId) -> Self {
        Self::Symbol(id)
    }
}

// ---------------------------------------------------------------------------
// Heap-resident data
// ---------------------------------------------------------------------------

/// A symbol slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Optional human-readable description. Not part of the hash.
    pub description: Option<String>,
    /// Global registry key, for string-addressable symbols.
    pub registry_key: Option<String>,
}

impl Symbol {
    /// Creates an unregistered symbol.
    #[must_use]
    pub fn unregistered(description: Option<&str>) -> Self {
        Self {
            description: description.map(str::to_owned),
            registry_key: None,
        }
    }

    /// Creates a symbol carrying a global registry key.
    #[must_use]
    pub fn registered(key: &str) -> Self {
        Self {
            description: Some(key.to_owned()),
            registry_key: Some(key.to_owned()),
        }
    }
}

/// An immutable aggregate of own properties.
///
/// Property order is whatever the creator supplied; it carries no meaning.
/// Keys are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composite {
    properties: Vec<(PropertyKey, Value)>,
}

impl Composite {
    /// Creates a composite from its own properties.
    ///
    /// A repeated key keeps the position of its first occurrence and the
    /// value of its last, as an object literal does.
    #[must_use]
    pub fn new(properties: Vec<(PropertyKey, Value)>) -> Self {
        let mut seen: HashMap<PropertyKey, usize> = HashMap::with_capacity(properties.len());
        let mut unique: Vec<(PropertyKey, Value)> = Vec::with_capacity(properties.len());
        for (key, value) in properties {
            if let Some(&at) = seen.get(&key) {
                unique[at].1 = value;
            } else {
                seen.insert(key.clone(), unique.len());
                unique.push((key, value));
            }
        }
        Self { properties: unique }
    }

    /// Returns the own properties in creator order.
    #[must_use]
    pub fn properties(&self) -> &[(PropertyKey, Value)] {
        &self.properties
    }

    /// Returns the number of own properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` if the composite has no own properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<K: Into<PropertyKey>, V: Into<Value>> FromIterator<(K, V)> for Composite {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// An object slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// An ordinary object, hashed by identity.
    Ordinary,
    /// A function, hashed by identity.
    Function {
        /// Function name, for diagnostics only.
        name: String,
    },
    /// A composite, hashed by structure.
    Composite(Composite),
}

impl Object {
    /// Returns the composite payload, if this object is one.
    #[must_use]
    pub const fn as_composite(&self) -> Option<&Composite> {
        match self {
            Self::Composite(c) => Some(c),
            Self::Ordinary | Self::Function { .. } => None,
        }
    }
}
