use crate::cache::{CacheEntry, IdentityCache, SymbolOrder};
use crate::error::{EntryState, HashError};
use crate::{Heap, HeapStore, Identity};

#[test]
fn register_then_finalize() {
    let mut heap = Heap::new();
    let id = Identity::from(heap.ordinary());
    let mut cache = IdentityCache::new(Some(1));

    assert_eq!(cache.lookup(id), None);
    cache.register_pending(id).unwrap();
    assert_eq!(cache.lookup(id), Some(CacheEntry::Pending));
    cache.finalize(id, 7).unwrap();
    assert_eq!(cache.lookup(id), Some(CacheEntry::Finalized(7)));
}

#[test]
fn register_twice_fails() {
    let mut heap = Heap::new();
    let id = Identity::from(heap.ordinary());
    let mut cache = IdentityCache::new(Some(1));

    cache.register_pending(id).unwrap();
    assert_eq!(
        cache.register_pending(id),
        Err(HashError::AlreadyRegistered(id))
    );
    cache.finalize(id, 1).unwrap();
    assert_eq!(
        cache.register_pending(id),
        Err(HashError::AlreadyRegistered(id))
    );
}

#[test]
fn finalize_requires_pending() {
    let mut heap = Heap::new();
    let id = Identity::from(heap.ordinary());
    let mut cache = IdentityCache::new(Some(1));

    assert_eq!(
        cache.finalize(id, 1),
        Err(HashError::InvalidState {
            identity: id,
            expected: EntryState::Pending,
            actual: EntryState::Absent,
        })
    );

    cache.register_pending(id).unwrap();
    cache.finalize(id, 1).unwrap();
    assert_eq!(
        cache.finalize(id, 2),
        Err(HashError::InvalidState {
            identity: id,
            expected: EntryState::Pending,
            actual: EntryState::Finalized,
        })
    );
    // The first value stays.
    assert_eq!(cache.lookup(id), Some(CacheEntry::Finalized(1)));
}

#[test]
fn random_identity_hash_is_stable_and_distinct() {
    let mut heap = Heap::new();
    let a = Identity::from(heap.ordinary());
    let b = Identity::from(heap.function("f"));
    let mut cache = IdentityCache::new(Some(42));

    let ha = cache.get_or_assign_random(a).unwrap();
    let hb = cache.get_or_assign_random(b).unwrap();
    assert_ne!(ha, hb);
    assert_eq!(cache.get_or_assign_random(a), Ok(ha));
    assert_eq!(cache.lookup(b), Some(CacheEntry::Finalized(hb)));
    assert_eq!(cache.len(), 2);
}

#[test]
fn random_identity_hash_rejects_pending() {
    let mut heap = Heap::new();
    let id = Identity::from(heap.ordinary());
    let mut cache = IdentityCache::new(None);

    cache.register_pending(id).unwrap();
    assert!(matches!(
        cache.get_or_assign_random(id),
        Err(HashError::InvalidState {
            actual: EntryState::Pending,
            ..
        })
    ));
}

#[test]
fn same_seed_same_sequence() {
    let mut heap = Heap::new();
    let ids: Vec<Identity> = (0..4).map(|_| heap.ordinary().into()).collect();
    let mut c1 = IdentityCache::new(Some(9));
    let mut c2 = IdentityCache::new(Some(9));

    for &id in &ids {
        assert_eq!(c1.get_or_assign_random(id), c2.get_or_assign_random(id));
    }
}

#[test]
fn symbol_order_first_seen_wins() {
    let mut heap = Heap::new();
    let s1 = heap.symbol_new(Some("one"));
    let s2 = heap.symbol_new(Some("two"));
    let mut order = SymbolOrder::new();

    assert_eq!(order.get(s1), None);
    let o1 = order.order_of(s1);
    let o2 = order.order_of(s2);
    assert!(o1 < o2);
    assert_eq!(order.order_of(s1), o1);
    assert_eq!(order.get(s2), Some(o2));
    assert_eq!(order.len(), 2);
}

/// The counter is process-wide: a second registry continues where the
/// first left off.
#[test]
fn symbol_order_is_monotonic_across_registries() {
    let mut heap = Heap::new();
    let s = heap.symbol_new(None);
    let mut first = SymbolOrder::new();
    let mut second = SymbolOrder::new();

    let a = first.order_of(s);
    let b = second.order_of(s);
    assert!(b > a);
}
