use tracing_test::traced_test;

use crate::{CompositeHasher, Heap, HeapStore};

/// The fold runs once; the second request is served from the cache.
#[traced_test]
#[test]
fn fold_runs_once() {
    let mut heap = Heap::new();
    let mut hasher = CompositeHasher::new();
    let id = hasher
        .alloc_composite(&mut heap, [("a", 1)].into_iter().collect())
        .unwrap();

    hasher.hash(&heap, id).unwrap();
    hasher.hash(&heap, id).unwrap();

    logs_assert(|lines: &[&str]| {
        match lines
            .iter()
            .filter(|line| line.contains("finalized composite hash"))
            .count()
        {
            1 => Ok(()),
            n => Err(format!("expected one fold, saw {n}")),
        }
    });
}

#[traced_test]
#[test]
fn identity_hash_assignment_is_traced() {
    let mut heap = Heap::new();
    let mut hasher = CompositeHasher::new();
    let obj = heap.ordinary();

    hasher.hash_value(&heap, &obj.into()).unwrap();
    assert!(logs_contain("assigned identity hash"));
}

#[traced_test]
#[test]
fn reclaim_is_logged() {
    let mut heap = Heap::new();
    let mut hasher = CompositeHasher::new();
    let cp = heap.checkpoint();
    let obj = heap.ordinary();
    hasher.hash_value(&heap, &obj.into()).unwrap();
    heap.rollback(cp);

    assert_eq!(hasher.reclaim(&heap), 1);
    assert!(logs_contain("reclaimed identity entries"));
}
