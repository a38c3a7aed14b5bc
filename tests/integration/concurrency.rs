//! Single-writer/multi-reader discipline under real threads
//!
//! Readers hold the store lock in shared mode for a whole query, so
//! they must never observe a posting list referring to a document that
//! the same query cannot fetch, nor a document under a bucket its field
//! value does not match.

use crate::common::*;
use std::thread;

#[test]
fn concurrent_readers_and_writer_stay_consistent() {
    let store = store_with_fields(&["group"]);
    let rounds = 200;

    thread::scope(|scope| {
        let store = &store;

        // writer: churn documents through two groups, deleting as it
        // goes. i and i+10 share parity, so each key keeps one group
        // for the whole run and never leaves a stale posting behind.
        scope.spawn(move || {
            for i in 0..rounds {
                let key = format!("k{}", i % 10);
                let group = if i % 2 == 0 { "even" } else { "odd" };
                let document = doc(serde_json::json!({"key": key, "group": group, "round": i}));
                store.store(&key, &document).unwrap();
                if i % 3 == 0 {
                    store.delete(&key).unwrap();
                }
            }
        });

        // readers: every document a query returns must match the bucket
        for group in ["even", "odd"] {
            scope.spawn(move || {
                for _ in 0..rounds {
                    let results = store.query("group", &Value::from(group)).unwrap();
                    for document in &results {
                        let fields = document.as_object().expect("stored docs are objects");
                        assert_eq!(
                            fields.get("group"),
                            Some(&Value::from(group)),
                            "query returned a document outside its bucket"
                        );
                    }
                }
            });
        }

        // point readers: retrieve is NotFound or a complete document
        scope.spawn(move || {
            for i in 0..rounds {
                let key = format!("k{}", i % 10);
                match store.retrieve(&key) {
                    Ok(document) => {
                        let fields = document.as_object().expect("stored docs are objects");
                        assert_eq!(fields.get("key"), Some(&Value::from(key.as_str())));
                    }
                    Err(err) => assert!(err.is_not_found(), "unexpected error: {err}"),
                }
            }
        });
    });
}

#[test]
fn writer_batches_are_atomic_under_readers() {
    let store = store_with_fields(&["tag"]);
    let rounds: usize = 100;

    thread::scope(|scope| {
        let store = &store;

        scope.spawn(move || {
            for i in 0..rounds {
                let keys = vec![format!("a{i}"), format!("b{i}")];
                let docs = vec![
                    doc(serde_json::json!({"tag": "pair", "half": "a", "round": i})),
                    doc(serde_json::json!({"tag": "pair", "half": "b", "round": i})),
                ];
                store.batch_store(&keys, &docs).unwrap();
            }
        });

        scope.spawn(move || {
            for _ in 0..rounds {
                // batches land two at a time, so a reader under the
                // shared lock never sees an odd count
                let results = store.query("tag", &Value::from("pair")).unwrap();
                assert_eq!(results.len() % 2, 0, "observed a half-committed batch");
            }
        });
    });

    let results = store.query("tag", &Value::from("pair")).unwrap();
    assert_eq!(results.len(), 2 * rounds);
}
