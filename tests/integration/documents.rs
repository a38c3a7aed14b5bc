//! Document lifecycle through the full stack

use crate::common::*;

#[test]
fn store_retrieve_roundtrip() {
    let store = store_with_fields(&[]);
    let document = doc(serde_json::json!({
        "id": "doc001",
        "data": {
            "name": "Example",
            "score": 42.5,
            "tags": ["test", "demo"],
            "active": true,
            "meta": null
        }
    }));
    store.store("doc001", &document).unwrap();
    assert_eq!(store.retrieve("doc001").unwrap(), document);
}

#[test]
fn retrieve_preserves_numeric_duality() {
    let store = store_with_fields(&[]);
    let document = doc(serde_json::json!({"int": 7, "float": 7.0}));
    store.store("k", &document).unwrap();

    let fetched = store.retrieve("k").unwrap();
    let fields = fetched.as_object().unwrap();
    assert_eq!(fields.get("int"), Some(&Value::Int(7)));
    assert_eq!(fields.get("float"), Some(&Value::Float(7.0)));
}

#[test]
fn retrieve_preserves_array_order() {
    let store = store_with_fields(&[]);
    let document = doc(serde_json::json!({"seq": [3, 1, 2, [4, 5]]}));
    store.store("k", &document).unwrap();
    assert_eq!(store.retrieve("k").unwrap(), document);
}

#[test]
fn unicode_content_survives_storage() {
    let store = store_with_fields(&[]);
    let document = doc(serde_json::json!({
        "name": "日本語",
        "emoji": "😀",
        "quoted": "say \"hi\"\n\tdone"
    }));
    store.store("k", &document).unwrap();
    assert_eq!(store.retrieve("k").unwrap(), document);
}

#[test]
fn retrieve_missing_fails_not_found() {
    let store = store_with_fields(&[]);
    assert!(store.retrieve("missing").unwrap_err().is_not_found());
}

#[test]
fn delete_missing_succeeds() {
    let store = store_with_fields(&[]);
    store.delete("missing").unwrap();
}

#[test]
fn delete_then_retrieve_fails() {
    let store = store_with_fields(&[]);
    store.store("k", &doc(serde_json::json!({"a": 1}))).unwrap();
    store.delete("k").unwrap();
    assert!(store.retrieve("k").unwrap_err().is_not_found());
}

#[test]
fn non_object_document_rejected() {
    let store = store_with_fields(&[]);
    let err = store.store("k", &Value::Array(vec![])).unwrap_err();
    assert!(matches!(err, Error::InvalidDocument { .. }));
}

#[test]
fn payload_bytes_use_document_prefix() {
    let store = store_with_fields(&[]);
    store.store("k1", &doc(serde_json::json!({"a": 1}))).unwrap();
    // wire layout: payload lives under doc:<key>
    let raw = store.backend().get(b"doc:k1").unwrap().expect("payload");
    assert_eq!(raw, br#"{"a":1}"#.to_vec());
}

#[test]
fn close_releases_backend() {
    let store = store_with_fields(&[]);
    store.store("k", &doc(serde_json::json!({"a": 1}))).unwrap();
    store.close().unwrap();
}
