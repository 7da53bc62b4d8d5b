//! Arena-backed heap (single-threaded).

use safe_bump::Arena;

use crate::store::{HeapCheckpoint, HeapStore};
use crate::value::{Object, ObjectId, Symbol, SymbolId};

/// Single-threaded heap using two [`Arena`]s.
pub struct Heap {
    objects: Arena<Object>,
    symbols: Arena<Symbol>,
}

impl Heap {
    /// Creates an empty heap.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            objects: Arena::new(),
            symbols: Arena::new(),
        }
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl HeapStore for Heap {
    fn alloc_object(&mut self, object: Object) -> ObjectId {
        ObjectId::from_idx(self.objects.alloc(object))
    }

    fn object(&self, id: ObjectId) -> &Object {
        self.objects.get(id.idx())
    }

    fn alloc_symbol(&mut self, symbol: Symbol) -> SymbolId {
        SymbolId::from_idx(self.symbols.alloc(symbol))
    }

    fn symbol(&self, id: SymbolId) -> &Symbol {
        self.symbols.get(id.idx())
    }

    fn checkpoint(&self) -> HeapCheckpoint {
        HeapCheckpoint {
            objects: self.objects.checkpoint(),
            symbols: self.symbols.checkpoint(),
        }
    }

    fn rollback(&mut self, cp: HeapCheckpoint) {
        self.objects.rollback(cp.objects);
        self.symbols.rollback(cp.symbols);
    }

    fn len(&self) -> (usize, usize) {
        (self.objects.len(), self.symbols.len())
    }
}
