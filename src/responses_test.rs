use serde_json::json;

use super::*;

#[test]
fn new_store_is_empty() {
    let store = ResponseStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn set_overwrites_and_returns_previous() {
    let mut store = ResponseStore::new();
    assert_eq!(store.set("q1", json!("first")), None);
    assert_eq!(store.set("q1", json!("second")), Some(json!("first")));
    assert_eq!(store.get("q1"), Some(&json!("second")));
    assert_eq!(store.len(), 1);
}

#[test]
fn values_are_untyped() {
    let mut store = ResponseStore::new();
    store.set("text", json!("hello"));
    store.set("number", json!(42));
    store.set("checks", json!(["option_1", "option_2"]));
    assert_eq!(store.get("number"), Some(&json!(42)));
    assert_eq!(store.get("checks").and_then(Value::as_array).map(Vec::len), Some(2));
}

#[test]
fn clear_empties_store() {
    let mut store = ResponseStore::new();
    store.set("a", json!(1));
    store.clear();
    assert!(store.is_empty());
    assert!(!store.contains("a"));
}

#[test]
fn extend_merges_entries() {
    let mut store = ResponseStore::new();
    store.set("a", json!(1));
    let incoming = json!({"a": 2, "b": 3});
    let Value::Object(map) = incoming else {
        unreachable!("fixture is an object");
    };
    store.extend(map);
    assert_eq!(store.get("a"), Some(&json!(2)));
    assert_eq!(store.get("b"), Some(&json!(3)));
}

#[test]
fn serializes_as_plain_object() {
    let mut store = ResponseStore::new();
    store.set("q1", json!("yes"));
    assert_eq!(serde_json::to_value(&store).unwrap(), json!({"q1": "yes"}));
    let back: ResponseStore = serde_json::from_value(json!({"q1": "yes"})).unwrap();
    assert_eq!(back, store);
}
