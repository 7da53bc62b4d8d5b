use crate::{CompositeHasher, HasherConfig, Heap, HeapStore, Identity, Value};

#[test]
fn default_config_supports_weak_symbols() {
    let hasher = CompositeHasher::default();
    assert!(hasher.config().supports_weak_symbol_identity);
    assert_eq!(hasher.config().rng_seed, None);
    assert!(hasher.cache().is_empty());
}

#[test]
fn config_from_json() {
    let cfg: HasherConfig =
        serde_json::from_str(r#"{"supports_weak_symbol_identity": false}"#).unwrap();
    assert_eq!(cfg, HasherConfig::without_weak_symbols());

    let cfg: HasherConfig = serde_json::from_str(r#"{"rng_seed": 17}"#).unwrap();
    assert_eq!(cfg, HasherConfig::default().with_rng_seed(17));

    let cfg: HasherConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, HasherConfig::default());
}

#[test]
fn config_rejects_unknown_fields() {
    let res = serde_json::from_str::<HasherConfig>(r#"{"weak": true}"#);
    assert!(res.is_err());
}

#[test]
fn debug_format() {
    let hasher = CompositeHasher::new();
    let dbg = format!("{hasher:?}");
    assert!(dbg.contains("CompositeHasher"));
    assert!(dbg.contains("entries"));
}

#[test]
fn identity_display() {
    let mut heap = Heap::new();
    let obj = heap.ordinary();
    let sym = heap.symbol_new(None);
    assert_eq!(Identity::from(obj).to_string(), "object#0");
    assert_eq!(Identity::from(sym).to_string(), "symbol#0");
}

#[test]
fn heap_len_and_contains() {
    let mut heap = Heap::new();
    assert!(heap.is_empty());
    let obj = heap.function("f");
    let sym = heap.registered_symbol("k");
    assert_eq!(heap.len(), (1, 1));
    assert!(heap.contains(obj.into()));
    assert!(heap.contains(sym.into()));
    assert_eq!(heap.symbol(sym).registry_key.as_deref(), Some("k"));
    assert!(heap.object(obj).as_composite().is_none());
}

#[test]
fn value_kinds() {
    assert_eq!(Value::from(1.5).kind(), "number");
    assert_eq!(Value::from("s").kind(), "string");
    assert_eq!(Value::Exotic("weakref").kind(), "weakref");
}
