use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::primitive::{number_hash, string_hash};
use crate::{Composite, CompositeHasher, Heap, Value};

fn build(pairs: impl IntoIterator<Item = (String, i32)>) -> Composite {
    pairs.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
}

proptest! {
    /// Creator order never affects the hash.
    #[test]
    fn prop_creator_order_irrelevant(
        entries in prop::collection::btree_map("[a-z]{1,6}", any::<i32>(), 0..12),
        rotate in 0usize..12,
    ) {
        let mut heap = Heap::new();
        let mut hasher = CompositeHasher::new();

        let forward: Vec<_> = entries.into_iter().collect();
        let mut shuffled = forward.clone();
        shuffled.reverse();
        if !shuffled.is_empty() {
            let n = rotate % shuffled.len();
            shuffled.rotate_left(n);
        }

        let a = hasher.alloc_composite(&mut heap, build(forward)).unwrap();
        let b = hasher.alloc_composite(&mut heap, build(shuffled)).unwrap();
        prop_assert_eq!(hasher.hash(&heap, a), hasher.hash(&heap, b));
    }

    /// Structurally equal composites agree across separate hashers of
    /// the same process.
    #[test]
    fn prop_equal_structure_equal_hash(
        entries in prop::collection::btree_map("[a-z]{1,6}", "[ -~]{0,10}", 0..8),
    ) {
        let mut heap = Heap::new();
        let mut h1 = CompositeHasher::new();
        let mut h2 = CompositeHasher::new();
        let composite: Composite = entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        let a = h1.alloc_composite(&mut heap, composite.clone()).unwrap();
        let b = h2.alloc_composite(&mut heap, composite).unwrap();
        prop_assert_eq!(h1.hash(&heap, a), h2.hash(&heap, b));
    }

    /// Repeated requests return the finalized value.
    #[test]
    fn prop_hash_idempotent(entries in prop::collection::btree_map("[a-z]{1,4}", any::<i32>(), 0..6)) {
        let mut heap = Heap::new();
        let mut hasher = CompositeHasher::new();
        let id = hasher.alloc_composite(&mut heap, build(entries)).unwrap();

        let first = hasher.hash(&heap, id).unwrap();
        prop_assert_eq!(hasher.maybe_hash(id), Some(first));
        prop_assert_eq!(hasher.hash(&heap, id), Ok(first));
    }

    #[test]
    fn prop_number_hash_value_equality(n in any::<f64>()) {
        prop_assert_eq!(number_hash(n), number_hash(n));
        if n == 0.0 {
            prop_assert_eq!(number_hash(n), number_hash(-n));
        }
        if n.is_nan() {
            prop_assert_eq!(number_hash(n), number_hash(f64::NAN));
        }
    }

    #[test]
    fn prop_string_hash_deterministic(s in ".*") {
        let first = string_hash(&s);
        prop_assert_eq!(first, string_hash(&s));
        if s.is_empty() {
            prop_assert_eq!(first, crate::seeds::seeds().string);
        }
    }
}

#[test]
fn sorted_map_and_reverse_map_agree() {
    let mut heap = Heap::new();
    let mut hasher = CompositeHasher::new();
    let map: BTreeMap<String, i32> = (0..20).map(|i| (format!("k{i}"), i)).collect();

    let a = hasher
        .alloc_composite(&mut heap, build(map.clone()))
        .unwrap();
    let b = hasher
        .alloc_composite(&mut heap, build(map.into_iter().rev()))
        .unwrap();
    assert_eq!(hasher.hash(&heap, a), hasher.hash(&heap, b));
}
