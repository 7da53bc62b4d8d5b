//! Identity cache and symbol discovery order.
//!
//! Both maps are keyed by arena identity. Entries live as long as the slot
//! they describe; after a heap rollback, [`IdentityCache::reclaim`] and
//! [`SymbolOrder::reclaim`] drop the entries of freed identities.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::OsRng;
use rand_xoshiro::Xoshiro256StarStar;
use tracing::trace;

use crate::error::{EntryState, HashError, Result};
use crate::store::HeapStore;
use crate::value::{Identity, SymbolId};

/// Cached state of one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEntry {
    /// Registered, hash not yet computed.
    Pending,
    /// Final hash.
    Finalized(u32),
}

impl CacheEntry {
    /// Returns the error-taxonomy state of an optional entry.
    #[must_use]
    pub const fn state(entry: Option<Self>) -> EntryState {
        match entry {
            None => EntryState::Absent,
            Some(Self::Pending) => EntryState::Pending,
            Some(Self::Finalized(_)) => EntryState::Finalized,
        }
    }
}

/// Identity → pending marker or final hash.
pub struct IdentityCache {
    entries: HashMap<Identity, CacheEntry>,
    rng: Xoshiro256StarStar,
}

impl IdentityCache {
    /// Creates an empty cache whose identity hashes come from a PRNG
    /// seeded with `seed`, or from the OS when `None`.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(
            || {
                let mut bytes = [0u8; 32];
                OsRng.fill_bytes(&mut bytes);
                Xoshiro256StarStar::from_seed(bytes)
            },
            Xoshiro256StarStar::seed_from_u64,
        );
        Self {
            entries: HashMap::new(),
            rng,
        }
    }

    /// Returns the entry for `id`, or `None` if absent.
    #[must_use]
    pub fn lookup(&self, id: Identity) -> Option<CacheEntry> {
        self.entries.get(&id).copied()
    }

    /// Registers `id` as pending.
    ///
    /// # Errors
    ///
    /// [`HashError::AlreadyRegistered`] if `id` already has an entry.
    pub fn register_pending(&mut self, id: Identity) -> Result<()> {
        if self.entries.contains_key(&id) {
            return Err(HashError::AlreadyRegistered(id));
        }
        self.entries.insert(id, CacheEntry::Pending);
        Ok(())
    }

    /// Transitions `id` from pending to `Finalized(hash)`.
    ///
    /// # Errors
    ///
    /// [`HashError::InvalidState`] unless `id` is currently pending.
    pub fn finalize(&mut self, id: Identity, hash: u32) -> Result<()> {
        let actual = CacheEntry::state(self.lookup(id));
        if actual != EntryState::Pending {
            return Err(HashError::InvalidState {
                identity: id,
                expected: EntryState::Pending,
                actual,
            });
        }
        self.entries.insert(id, CacheEntry::Finalized(hash));
        Ok(())
    }

    /// Returns the identity hash of `id`, assigning a random one on first
    /// use.
    ///
    /// # Errors
    ///
    /// [`HashError::InvalidState`] if `id` is pending: pending identities
    /// are composites and hash by structure.
    pub fn get_or_assign_random(&mut self, id: Identity) -> Result<u32> {
        match self.lookup(id) {
            Some(CacheEntry::Finalized(hash)) => Ok(hash),
            Some(CacheEntry::Pending) => Err(HashError::InvalidState {
                identity: id,
                expected: EntryState::Finalized,
                actual: EntryState::Pending,
            }),
            None => {
                let hash = self.rng.next_u32();
                trace!(identity = %id, hash, "assigned identity hash");
                self.entries.insert(id, CacheEntry::Finalized(hash));
                Ok(hash)
            }
        }
    }

    /// Removes the entry for `id`. Returns `true` if there was one.
    pub fn remove(&mut self, id: Identity) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Drops entries whose identity is no longer live in `store`.
    ///
    /// Returns the number of entries removed.
    pub fn reclaim<S: HeapStore + ?Sized>(&mut self, store: &S) -> usize {
        let before = self.entries.len();
        self.entries.retain(|&id, _| store.contains(id));
        before - self.entries.len()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Symbol discovery order
// ---------------------------------------------------------------------------

/// Process-wide logical clock for symbol discovery. Never reset.
static NEXT_ORDER: AtomicU64 = AtomicU64::new(0);

/// Incidental first-seen order of unregistered symbols.
///
/// Order numbers come from one process-wide counter, so they are
/// monotonic across every registry in the process. They are stable for a
/// symbol's lifetime and carry no meaning beyond that.
#[derive(Debug, Default)]
pub struct SymbolOrder {
    orders: HashMap<SymbolId, u64>,
}

impl SymbolOrder {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the order of `id`, assigning the next one on first sight.
    pub fn order_of(&mut self, id: SymbolId) -> u64 {
        *self
            .orders
            .entry(id)
            .or_insert_with(|| NEXT_ORDER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the order of `id` if it was already observed.
    #[must_use]
    pub fn get(&self, id: SymbolId) -> Option<u64> {
        self.orders.get(&id).copied()
    }

    /// Drops orders of symbols no longer live in `store`.
    ///
    /// Returns the number of entries removed.
    pub fn reclaim<S: HeapStore + ?Sized>(&mut self, store: &S) -> usize {
        let before = self.orders.len();
        self.orders
            .retain(|&id, _| store.contains(Identity::Symbol(id)));
        before - self.orders.len()
    }

    /// Returns the number of observed symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns `true` if no symbol has been observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
