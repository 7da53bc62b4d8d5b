//! Thread-safe composite hasher.

use std::fmt;

use parking_lot::Mutex;

use crate::config::HasherConfig;
use crate::error::Result;
use crate::hasher::CompositeHasher;
use crate::store::HeapStore;
use crate::value::{Composite, ObjectId, Value};

/// [`CompositeHasher`] behind one global lock.
///
/// Every cache transition, including the whole `Pending → Finalized` fold
/// of a composite, happens under the lock, so concurrent callers observe
/// each transition atomically. Pair with [`HeapSync`](crate::HeapSync) to
/// share a heap across threads.
pub struct CompositeHasherSync {
    inner: Mutex<CompositeHasher>,
}

impl CompositeHasherSync {
    /// Creates a hasher with the default config.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HasherConfig::default())
    }

    /// Creates a hasher with `config`.
    #[must_use]
    pub fn with_config(config: HasherConfig) -> Self {
        Self {
            inner: Mutex::new(CompositeHasher::with_config(config)),
        }
    }

    /// See [`CompositeHasher::prepare_lazy_hash`].
    ///
    /// # Errors
    ///
    /// As for [`CompositeHasher::prepare_lazy_hash`].
    pub fn prepare_lazy_hash<S: HeapStore + ?Sized>(&self, store: &S, id: ObjectId) -> Result<()> {
        self.inner.lock().prepare_lazy_hash(store, id)
    }

    /// See [`CompositeHasher::alloc_composite`].
    ///
    /// # Errors
    ///
    /// As for [`CompositeHasher::alloc_composite`].
    pub fn alloc_composite<S: HeapStore + ?Sized>(
        &self,
        store: &mut S,
        composite: Composite,
    ) -> Result<ObjectId> {
        self.inner.lock().alloc_composite(store, composite)
    }

    /// See [`CompositeHasher::maybe_hash`].
    #[must_use]
    pub fn maybe_hash(&self, id: ObjectId) -> Option<u32> {
        self.inner.lock().maybe_hash(id)
    }

    /// See [`CompositeHasher::hash`].
    ///
    /// # Errors
    ///
    /// As for [`CompositeHasher::hash`].
    pub fn hash<S: HeapStore + ?Sized>(&self, store: &S, id: ObjectId) -> Result<u32> {
        self.inner.lock().hash(store, id)
    }

    /// See [`CompositeHasher::hash_value`].
    ///
    /// # Errors
    ///
    /// As for [`CompositeHasher::hash_value`].
    pub fn hash_value<S: HeapStore + ?Sized>(&self, store: &S, value: &Value) -> Result<u32> {
        self.inner.lock().hash_value(store, value)
    }

    /// See [`CompositeHasher::reclaim`].
    pub fn reclaim<S: HeapStore + ?Sized>(&self, store: &S) -> usize {
        self.inner.lock().reclaim(store)
    }

    /// Consumes the wrapper, returning the single-threaded hasher.
    #[must_use]
    pub fn into_inner(self) -> CompositeHasher {
        self.inner.into_inner()
    }
}

impl Default for CompositeHasherSync {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CompositeHasherSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeHasherSync").finish_non_exhaustive()
    }
}
