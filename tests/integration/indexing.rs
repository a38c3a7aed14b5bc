//! Posting-list maintenance and query semantics

use crate::common::*;

#[test]
fn query_returns_all_matching_documents() {
    let store = store_with_fields(&["a"]);
    store
        .store("k1", &doc(serde_json::json!({"key": "k1", "a": 5})))
        .unwrap();
    store
        .store("k2", &doc(serde_json::json!({"key": "k2", "a": 5})))
        .unwrap();

    let results = store.query("a", &Value::Int(5)).unwrap();
    assert_eq!(keys_of(&results), vec!["k1", "k2"]);
}

#[test]
fn delete_narrows_query_results() {
    let store = store_with_fields(&["a"]);
    store
        .store("k1", &doc(serde_json::json!({"key": "k1", "a": 5})))
        .unwrap();
    store
        .store("k2", &doc(serde_json::json!({"key": "k2", "a": 5})))
        .unwrap();

    store.delete("k1").unwrap();
    let results = store.query("a", &Value::Int(5)).unwrap();
    assert_eq!(keys_of(&results), vec!["k2"]);
}

#[test]
fn emptied_posting_list_is_deleted_from_backend() {
    let store = store_with_fields(&["a"]);
    store.store("k1", &doc(serde_json::json!({"a": 5}))).unwrap();
    store.store("k2", &doc(serde_json::json!({"a": 5}))).unwrap();
    assert!(store.backend().get(&index_key("a", "5")).unwrap().is_some());

    store.delete("k1").unwrap();
    store.delete("k2").unwrap();

    // direct backend inspection: the entry is gone, not merely empty
    assert_eq!(store.backend().get(&index_key("a", "5")).unwrap(), None);
}

#[test]
fn query_on_undeclared_field_fails() {
    let store = store_with_fields(&["a"]);
    let err = store.query("other", &Value::Int(1)).unwrap_err();
    assert!(matches!(err, Error::NotIndexed { .. }));
}

#[test]
fn query_with_no_matches_is_empty() {
    let store = store_with_fields(&["a"]);
    store.store("k1", &doc(serde_json::json!({"a": 5}))).unwrap();
    assert!(store.query("a", &Value::Int(6)).unwrap().is_empty());
}

#[test]
fn query_by_bool_null_and_string_values() {
    let store = store_with_fields(&["flag", "note", "name"]);
    store
        .store(
            "k1",
            &doc(serde_json::json!({"key": "k1", "flag": true, "note": null, "name": "Ada"})),
        )
        .unwrap();
    store
        .store(
            "k2",
            &doc(serde_json::json!({"key": "k2", "flag": false, "name": "Ada"})),
        )
        .unwrap();

    assert_eq!(keys_of(&store.query("flag", &Value::Bool(true)).unwrap()), vec!["k1"]);
    assert_eq!(keys_of(&store.query("flag", &Value::Bool(false)).unwrap()), vec!["k2"]);
    assert_eq!(keys_of(&store.query("note", &Value::Null).unwrap()), vec!["k1"]);
    assert_eq!(
        keys_of(&store.query("name", &Value::from("Ada")).unwrap()),
        vec!["k1", "k2"]
    );
}

#[test]
fn index_key_layout_on_the_wire() {
    let store = store_with_fields(&["name"]);
    store
        .store("k1", &doc(serde_json::json!({"name": "Ada"})))
        .unwrap();
    let raw = store
        .backend()
        .get(b"index:name:Ada")
        .unwrap()
        .expect("posting list under index:<field>:<bucket>");
    assert_eq!(raw, br#"["k1"]"#.to_vec());
}

#[test]
fn multiple_indexed_fields_update_independently() {
    let store = store_with_fields(&["a", "b"]);
    store
        .store("k1", &doc(serde_json::json!({"key": "k1", "a": 1, "b": "x"})))
        .unwrap();
    store
        .store("k2", &doc(serde_json::json!({"key": "k2", "a": 1})))
        .unwrap();

    assert_eq!(keys_of(&store.query("a", &Value::Int(1)).unwrap()), vec!["k1", "k2"]);
    assert_eq!(keys_of(&store.query("b", &Value::from("x")).unwrap()), vec!["k1"]);

    store.delete("k1").unwrap();
    assert_eq!(keys_of(&store.query("a", &Value::Int(1)).unwrap()), vec!["k2"]);
    assert!(store.query("b", &Value::from("x")).unwrap().is_empty());
}

#[test]
fn posting_order_is_first_insertion() {
    let store = store_with_fields(&["a"]);
    for key in ["z", "a", "m"] {
        store
            .store(key, &doc(serde_json::json!({"key": key, "a": 1})))
            .unwrap();
    }
    let raw = store.backend().get(&index_key("a", "1")).unwrap().unwrap();
    assert_eq!(raw, br#"["z","a","m"]"#.to_vec());
}

#[test]
fn restore_with_changed_value_leaves_old_posting() {
    // store only appends to posting lists; re-storing a key with a new
    // field value does not unregister the old pairing. The document
    // then answers queries for both values until it is deleted.
    let store = store_with_fields(&["a"]);
    store
        .store("k1", &doc(serde_json::json!({"key": "k1", "a": 5})))
        .unwrap();
    store
        .store("k1", &doc(serde_json::json!({"key": "k1", "a": 6})))
        .unwrap();

    assert_eq!(keys_of(&store.query("a", &Value::Int(5)).unwrap()), vec!["k1"]);
    assert_eq!(keys_of(&store.query("a", &Value::Int(6)).unwrap()), vec!["k1"]);

    // delete clears the posting for the *current* value only
    store.delete("k1").unwrap();
    assert!(store.query("a", &Value::Int(6)).unwrap().is_empty());
    assert!(store.backend().get(&index_key("a", "5")).unwrap().is_some());

    // the dangling posting is skipped best-effort, not surfaced
    assert!(store.query("a", &Value::Int(5)).unwrap().is_empty());
}

#[test]
fn float_and_int_field_values_bucket_separately() {
    let store = store_with_fields(&["n"]);
    store
        .store("ki", &doc(serde_json::json!({"key": "ki", "n": 3})))
        .unwrap();
    store
        .store("kf", &doc(serde_json::json!({"key": "kf", "n": 3.0})))
        .unwrap();

    assert_eq!(keys_of(&store.query("n", &Value::Int(3)).unwrap()), vec!["ki"]);
    assert_eq!(keys_of(&store.query("n", &Value::Float(3.0)).unwrap()), vec!["kf"]);
    assert!(store.backend().get(&index_key("n", "3")).unwrap().is_some());
    assert!(store.backend().get(&index_key("n", "3.0")).unwrap().is_some());
}
