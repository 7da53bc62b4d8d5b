//! Storage abstraction for the value model.

use safe_bump::Checkpoint;

use crate::value::{Composite, Identity, Object, ObjectId, Symbol, SymbolId};

/// Saved state of the two heap arenas.
pub struct HeapCheckpoint {
    /// Objects arena checkpoint.
    pub objects: Checkpoint<Object>,
    /// Symbols arena checkpoint.
    pub symbols: Checkpoint<Symbol>,
}

// HeapCheckpoint contains only Checkpoint<T> values (Copy).

impl Clone for HeapCheckpoint {
    fn clone(&self) -> Self {
        *self
    }
}

impl Copy for HeapCheckpoint {}

/// Storage backend holding objects and symbols by identity.
///
/// Abstracts over [`Arena`](safe_bump::Arena) (single-thread) and
/// [`SharedArena`](safe_bump::SharedArena) (multi-thread) backends. Slots
/// are immutable once allocated; an identity stays valid until a
/// [`rollback`](Self::rollback) past its allocation.
pub trait HeapStore {
    /// Allocates an object, returning its identity.
    fn alloc_object(&mut self, object: Object) -> ObjectId;

    /// Returns the object at `id`.
    fn object(&self, id: ObjectId) -> &Object;

    /// Allocates a symbol, returning its identity.
    fn alloc_symbol(&mut self, symbol: Symbol) -> SymbolId;

    /// Returns the symbol at `id`.
    fn symbol(&self, id: SymbolId) -> &Symbol;

    /// Saves the current state of both arenas.
    fn checkpoint(&self) -> HeapCheckpoint;

    /// Rolls both arenas back to a previous checkpoint, freeing every
    /// identity allocated after it.
    fn rollback(&mut self, cp: HeapCheckpoint);

    /// Returns the number of allocated slots: `(objects, symbols)`.
    fn len(&self) -> (usize, usize);

    /// Returns `true` if no object or symbol has been allocated.
    fn is_empty(&self) -> bool {
        self.len() == (0, 0)
    }

    /// Returns `true` if `identity` names a live slot.
    fn contains(&self, identity: Identity) -> bool {
        let (objects, symbols) = self.len();
        match identity {
            Identity::Object(id) => id.raw() < objects,
            Identity::Symbol(id) => id.raw() < symbols,
        }
    }

    /// Returns the object at `id`, or `None` if the slot is not live.
    fn try_object(&self, id: ObjectId) -> Option<&Object> {
        self.contains(id.into()).then(|| self.object(id))
    }

    /// Returns the symbol at `id`, or `None` if the slot is not live.
    fn try_symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.contains(id.into()).then(|| self.symbol(id))
    }

    // -----------------------------------------------------------------------
    // Convenience constructors
    // -----------------------------------------------------------------------

    /// Allocates an ordinary object.
    fn ordinary(&mut self) -> ObjectId {
        self.alloc_object(Object::Ordinary)
    }

    /// Allocates a function object.
    fn function(&mut self, name: &str) -> ObjectId {
        self.alloc_object(Object::Function {
            name: name.to_owned(),
        })
    }

    /// Allocates a composite. It still has to be prepared for hashing.
    fn composite(&mut self, composite: Composite) -> ObjectId {
        self.alloc_object(Object::Composite(composite))
    }

    /// Allocates an unregistered symbol.
    fn symbol_new(&mut self, description: Option<&str>) -> SymbolId {
        self.alloc_symbol(Symbol::unregistered(description))
    }

    /// Allocates a fresh symbol identity carrying a registry key.
    ///
    /// Each call yields a distinct identity, even for an equal `key`.
    fn registered_symbol(&mut self, key: &str) -> SymbolId {
        self.alloc_symbol(Symbol::registered(key))
    }
}
