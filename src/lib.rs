//! Folio — embedded JSON document store
//!
//! Folio stores JSON documents under opaque string keys in a local,
//! single-process engine, and maintains secondary indexes so documents
//! can also be looked up by the value of a field. It ships its own JSON
//! codec (the storage format) and a pluggable backend contract; the
//! bundled [`MemoryEngine`] backs the store without persistence, and
//! durable engines plug in through the same traits.
//!
//! # Quick Start
//!
//! ```
//! use folio::{DocumentStore, MemoryEngine, Value};
//!
//! # fn main() -> folio::Result<()> {
//! // Index the "city" field
//! let store = DocumentStore::new(MemoryEngine::new(), ["city"])?;
//!
//! let alice: Value = serde_json::json!({"name": "Alice", "city": "Oslo"}).into();
//! let bo: Value = serde_json::json!({"name": "Bo", "city": "Oslo"}).into();
//! store.store("user:1", &alice)?;
//! store.store("user:2", &bo)?;
//!
//! // Primary-key lookup
//! assert_eq!(store.retrieve("user:1")?, alice);
//!
//! // Secondary-index lookup
//! let oslo = store.query("city", &Value::from("Oslo"))?;
//! assert_eq!(oslo.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `folio-core`: the [`Value`] model and backend key namespacing
//! - `folio-codec`: [`decode`]/[`encode`] between bytes and [`Value`]
//! - `folio-backend`: the [`Backend`]/[`Transaction`] contract and the
//!   in-memory reference engine
//! - `folio-store`: [`DocumentStore`], one backend transaction per
//!   write, single-writer/multi-reader locking across operations

pub use folio_backend::{Backend, BackendError, MemoryEngine, MemoryTransaction, Transaction};
pub use folio_codec::{decode, encode, encode_into, EncodeError, SyntaxError};
pub use folio_core::{
    document_key, index_key, FieldError, Value, DOC_PREFIX, INDEX_PREFIX, SEGMENT_DELIMITER,
};
pub use folio_store::{bucket, DocumentStore, Error, Result};
