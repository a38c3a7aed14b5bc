//! Shared test utilities for the integration suites.
//!
//! Import via `mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::sync::Once;

pub use folio::{
    index_key, Backend, DocumentStore, Error, MemoryEngine, SyntaxError, Value,
};

static INIT_TRACING: Once = Once::new();

/// Route store logs through the test writer, once per binary.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Build a Value document from a json! literal.
pub fn doc(json: serde_json::Value) -> Value {
    json.into()
}

/// Store over a fresh in-memory engine with the given indexed fields.
pub fn store_with_fields(fields: &[&str]) -> DocumentStore<MemoryEngine> {
    init_tracing();
    DocumentStore::new(MemoryEngine::new(), fields.iter().copied())
        .expect("valid indexed fields")
}

/// Collect the `key` field of every returned document, sorted.
pub fn keys_of(results: &[Value]) -> Vec<String> {
    let mut keys: Vec<String> = results
        .iter()
        .filter_map(|d| d.as_object())
        .filter_map(|o| o.get("key"))
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();
    keys.sort();
    keys
}
