//! Shared-arena-backed heap (multi-threaded).

use safe_bump::SharedArena;

use crate::store::{HeapCheckpoint, HeapStore};
use crate::value::{Object, ObjectId, Symbol, SymbolId};

/// Thread-safe heap using two [`SharedArena`]s.
pub struct HeapSync {
    objects: SharedArena<Object>,
    symbols: SharedArena<Symbol>,
}

impl HeapSync {
    /// Creates an empty heap.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            objects: SharedArena::new(),
            symbols: SharedArena::new(),
        }
    }
}

impl Default for HeapSync {
    fn default() -> Self {
        Self::new()
    }
}

impl HeapStore for HeapSync {
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
