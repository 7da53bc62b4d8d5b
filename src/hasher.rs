//! Composite hasher — lazy, cached structural hashing.
//!
//! Per-composite state machine, keyed by identity in the
//! [`IdentityCache`]:
//!
//! ```text
//! Unregistered ──prepare_lazy_hash──▶ Pending ──hash──▶ Finalized(h)
//! ```
//!
//! The fold over a composite's hashable keys is
//! `h ^= hash(key) ^ KEY; h ^= hash(value)`. XOR makes the result
//! independent of traversal order; the canonical order only decides which
//! suffix of keys an early stop excludes.

use std::fmt;

use tracing::{debug, trace};

use crate::cache::{CacheEntry, IdentityCache, SymbolOrder};
use crate::canonical;
use crate::config::HasherConfig;
use crate::error::{EntryState, HashError, Result};
use crate::primitive;
use crate::store::HeapStore;
use crate::value::{Composite, Identity, ObjectId, PropertyKey, SymbolId, Value};

/// Lazy structural hasher for composites of one heap.
///
/// Identities are only meaningful for the heap that issued them: use one
/// hasher per heap.
pub struct CompositeHasher {
    config: HasherConfig,
    cache: IdentityCache,
    symbols: SymbolOrder,
    /// Composites whose fold is currently running, innermost last.
    in_progress: Vec<ObjectId>,
}

// ---------------------------------------------------------------------------
// Construction & accessors
// ---------------------------------------------------------------------------

impl CompositeHasher {
    /// Creates a hasher with the default config.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HasherConfig::default())
    }

    /// Creates a hasher with `config`.
    #[must_use]
    pub fn with_config(config: HasherConfig) -> Self {
        Self {
            cache: IdentityCache::new(config.rng_seed),
            symbols: SymbolOrder::new(),
            in_progress: Vec::new(),
            config,
        }
    }

    /// Returns the active config.
    #[must_use]
    pub const fn config(&self) -> &HasherConfig {
        &self.config
    }

    /// Returns the identity cache.
    #[must_use]
    pub const fn cache(&self) -> &IdentityCache {
        &self.cache
    }

    /// Returns the symbol discovery-order registry.
    #[must_use]
    pub const fn symbol_order(&self) -> &SymbolOrder {
        &self.symbols
    }

    /// Drops cache entries and symbol orders of identities no longer live
    /// in `store`. Call after rolling the heap back.
    ///
    /// Returns the number of entries removed.
    pub fn reclaim<S: HeapStore + ?Sized>(&mut self, store: &S) -> usize {
        let removed = self.cache.reclaim(store) + self.symbols.reclaim(store);
        debug!(removed, remaining = self.cache.len(), "reclaimed identity entries");
        removed
    }
}

impl Default for CompositeHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CompositeHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeHasher")
            .field("config", &self.config)
            .field("entries", &self.cache.len())
            .field("symbols", &self.symbols.len())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

impl CompositeHasher {
    /// Registers a composite as pending. Must precede any hash request.
    ///
    /// # Errors
    ///
    /// - [`HashError::DanglingIdentity`] if `id` is not live in `store`.
    /// - [`HashError::NotAComposite`] if `id` is not a composite.
    /// - [`HashError::AlreadyRegistered`] if `id` was already prepared.
    pub fn prepare_lazy_hash<S: HeapStore + ?Sized>(
        &mut self,
        store: &S,
        id: ObjectId,
    ) -> Result<()> {
        live_composite(store, id)?;
        self.cache.register_pending(id.into())
    }

    /// Allocates `composite` in `store` and prepares it.
    ///
    /// If the new slot still carries an entry because `store` was rolled
    /// back without a [`reclaim`](Self::reclaim), that entry and every
    /// entry beyond the live length are dropped first. Slots reused by
    /// other allocations still need an explicit `reclaim`.
    ///
    /// # Errors
    ///
    /// As for [`prepare_lazy_hash`](Self::prepare_lazy_hash); unreachable
    /// for a slot this call allocated.
    pub fn alloc_composite<S: HeapStore + ?Sized>(
        &mut self,
        store: &mut S,
        composite: Composite,
    ) -> Result<ObjectId> {
        let id = store.composite(composite);
        if self.cache.lookup(id.into()).is_some() {
            self.reclaim_stale(&*store, id);
        }
        self.prepare_lazy_hash(store, id)?;
        Ok(id)
    }

    /// Returns the hash of `id` if it is already finalized. Never computes.
    ///
    /// The kind of `id` is not checked: for a plain object this reports its
    /// identity hash once one was assigned. [`hash`](Self::hash) checks.
    #[must_use]
    pub fn maybe_hash(&self, id: ObjectId) -> Option<u32> {
        match self.cache.lookup(id.into()) {
            Some(CacheEntry::Finalized(hash)) => Some(hash),
            Some(CacheEntry::Pending) | None => None,
        }
    }

    /// Returns the structural hash of composite `id`, computing and caching
    /// it on first request.
    ///
    /// # Errors
    ///
    /// - [`HashError::DanglingIdentity`] if `id`, or an identity it
    ///   reaches, is not live in `store`.
    /// - [`HashError::NotAComposite`] if `id` is not a composite.
    /// - [`HashError::InvalidState`] if `id`, or a nested composite, was
    ///   never prepared.
    /// - [`HashError::CyclicComposite`] if the composite graph reaches a
    ///   composite whose fold is still running.
    /// - [`HashError::UnsupportedValueKind`] for an exotic value.
    ///
    /// On error no composite is finalized by the failing fold.
    pub fn hash<S: HeapStore + ?Sized>(&mut self, store: &S, id: ObjectId) -> Result<u32> {
        // Identity hashes of plain objects share the cache; never serve one
        // as a structural hash.
        live_composite(store, id)?;
        match self.cache.lookup(id.into()) {
            Some(CacheEntry::Finalized(hash)) => Ok(hash),
            Some(CacheEntry::Pending) => self.compute(store, id),
            None => Err(HashError::InvalidState {
                identity: id.into(),
                expected: EntryState::Pending,
                actual: EntryState::Absent,
            }),
        }
    }

    /// Hashes any value, dispatching on its kind.
    ///
    /// # Errors
    ///
    /// As for [`hash`](Self::hash).
    pub fn hash_value<S: HeapStore + ?Sized>(&mut self, store: &S, value: &Value) -> Result<u32> {
        match value {
            Value::Undefined => Ok(primitive::undefined_hash()),
            Value::Null => Ok(primitive::null_hash()),
            Value::Bool(b) => Ok(primitive::bool_hash(*b)),
            Value::Number(n) => Ok(primitive::number_hash(*n)),
            Value::BigInt(n) => Ok(primitive::bigint_hash(*n)),
            Value::String(s) => Ok(primitive::string_hash(s)),
            Value::Symbol(id) => self.symbol_hash(store, *id),
            Value::Object(id) => self.object_hash(store, *id),
            Value::Exotic(kind) => Err(HashError::UnsupportedValueKind((*kind).to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Fold
// ---------------------------------------------------------------------------

impl CompositeHasher {
    fn compute<S: HeapStore + ?Sized>(&mut self, store: &S, id: ObjectId) -> Result<u32> {
        if self.in_progress.contains(&id) {
            return Err(HashError::CyclicComposite(id.into()));
        }
        let composite = live_composite(store, id)?;

        self.in_progress.push(id);
        let folded = self.fold(store, composite);
        self.in_progress.pop();
        let hash = folded?;

        // A nested fold must not have finalized this identity meanwhile.
        self.cache.finalize(id.into(), hash)?;
        trace!(composite = %id, hash, "finalized composite hash");
        Ok(hash)
    }

    fn fold<S: HeapStore + ?Sized>(&mut self, store: &S, composite: &Composite) -> Result<u32> {
        let properties = composite.properties();
        let keys = canonical::canonicalize(
            store,
            properties,
            &mut self.symbols,
            self.config.supports_weak_symbol_identity,
        )?;
        if keys.is_truncated() {
            trace!(
                hashed = keys.hashable().len(),
                total = properties.len(),
                "stopped at untrackable symbol key"
            );
        }

        let mut running = 0_u32;
        for &i in keys.hashable() {
            let (key, value) = &properties[i];
            running ^= self.key_hash(store, key)? ^ primitive::key_slot();
            running ^= self.hash_value(store, value)?;
        }
        Ok(running)
    }

    fn key_hash<S: HeapStore + ?Sized>(&mut self, store: &S, key: &PropertyKey) -> Result<u32> {
        match key {
            PropertyKey::String(s) => Ok(primitive::string_hash(s)),
            PropertyKey::Symbol(id) => self.symbol_hash(store, *id),
        }
    }

    fn symbol_hash<S: HeapStore + ?Sized>(&mut self, store: &S, id: SymbolId) -> Result<u32> {
        let symbol = store
            .try_symbol(id)
            .ok_or(HashError::DanglingIdentity(Identity::Symbol(id)))?;
        if let Some(key) = symbol.registry_key.as_deref() {
            return Ok(primitive::registered_symbol_hash(key));
        }
        if !self.config.supports_weak_symbol_identity {
            return Ok(primitive::untracked_symbol_hash());
        }
        self.identity_hash(store, id.into())
    }

    fn object_hash<S: HeapStore + ?Sized>(&mut self, store: &S, id: ObjectId) -> Result<u32> {
        let object = store
            .try_object(id)
            .ok_or(HashError::DanglingIdentity(Identity::Object(id)))?;
        if object.as_composite().is_some() {
            // Composites hash by structure and must have been prepared.
            return self.hash(store, id);
        }
        self.identity_hash(store, id.into())
    }

    /// Reference-identity hash; a pending identity resolves through the
    /// composite fold.
    fn identity_hash<S: HeapStore + ?Sized>(&mut self, store: &S, identity: Identity) -> Result<u32> {
        match (self.cache.lookup(identity), identity) {
            (Some(CacheEntry::Pending), Identity::Object(id)) => self.compute(store, id),
            (Some(CacheEntry::Pending), Identity::Symbol(_)) => {
                Err(HashError::NotAComposite(identity))
            }
            _ => self.cache.get_or_assign_random(identity),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

impl CompositeHasher {
    /// Drops entries left over from slots at or beyond `fresh`, which
    /// `store` has just handed out again after a rollback.
    fn reclaim_stale<S: HeapStore + ?Sized>(&mut self, store: &S, fresh: ObjectId) {
        let removed = self.cache.reclaim(store) + self.symbols.reclaim(store);
        // The fresh slot is live again, so `reclaim` kept its entry.
        let fresh_removed = usize::from(self.cache.remove(fresh.into()));
        debug!(
            removed = removed + fresh_removed,
            slot = %fresh,
            "reclaimed entries of rolled-back slots"
        );
    }
}

/// Returns the composite at `id`, checking liveness and kind.
fn live_composite<S: HeapStore + ?Sized>(store: &S, id: ObjectId) -> Result<&Composite> {
    store
        .try_object(id)
        .ok_or(HashError::DanglingIdentity(Identity::Object(id)))?
        .as_composite()
        .ok_or(HashError::NotAComposite(Identity::Object(id)))
}
