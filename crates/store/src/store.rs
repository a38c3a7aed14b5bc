//! Document store
//!
//! `DocumentStore` orchestrates the codec, the bucket deriver and the
//! backend: every write keeps a document and its posting lists
//! consistent inside a single backend transaction, and a process-wide
//! reader-writer lock gives single-writer/multi-reader semantics across
//! all public operations.
//!
//! ## Locking discipline
//!
//! Writers (`store`, `delete`, `batch_store`) hold the lock exclusively
//! for their full duration, backend commit included. Readers
//! (`retrieve`, `query`, `batch_retrieve`) hold it shared. Query's
//! two-step read (posting list, then each document) is therefore atomic
//! with respect to writers. There is no timeout or cancellation layer;
//! operations run on the caller's thread and may block on the lock.
//!
//! ## Atomicity
//!
//! All writes of one logical operation are buffered in one backend
//! transaction. Any failure returns before `commit`, dropping the
//! transaction and with it every pending write: a document is never
//! persisted without its index updates, or vice versa.

use crate::bucket::bucket;
use crate::error::{Error, Result};
use crate::posting::{decode_postings, encode_postings};
use folio_backend::{Backend, Transaction};
use folio_core::{document_key, index_key, validate_field, Value};
use parking_lot::RwLock;
use tracing::{debug, warn};

/// An embedded JSON document store with single-field secondary indexes.
///
/// Documents are Object-shaped [`Value`]s under opaque string keys.
/// Fields named at construction are indexed: storing a document that
/// carries such a field registers its key in the posting list for that
/// field's value, and [`DocumentStore::query`] looks documents up by
/// field value without scanning.
///
/// # Example
///
/// ```
/// use folio_backend::MemoryEngine;
/// use folio_store::DocumentStore;
/// use folio_core::Value;
///
/// # fn main() -> folio_store::Result<()> {
/// let store = DocumentStore::new(MemoryEngine::new(), ["city"])?;
///
/// let doc: Value = serde_json::json!({"name": "Ada", "city": "London"}).into();
/// store.store("user:1", &doc)?;
///
/// assert_eq!(store.retrieve("user:1")?, doc);
/// assert_eq!(store.query("city", &Value::from("London"))?, vec![doc]);
/// # Ok(())
/// # }
/// ```
pub struct DocumentStore<B: Backend> {
    backend: B,
    indexed_fields: Vec<String>,
    /// Single-writer/multi-reader discipline for every public operation.
    lock: RwLock<()>,
}

impl<B: Backend> DocumentStore<B> {
    /// Create a store over `backend` with the given indexed fields.
    ///
    /// Field names must be non-empty and free of the key segment
    /// delimiter; duplicates are collapsed.
    pub fn new<I, S>(backend: B, indexed_fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields: Vec<String> = Vec::new();
        for field in indexed_fields {
            let field = field.into();
            validate_field(&field)?;
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        Ok(DocumentStore {
            backend,
            indexed_fields: fields,
            lock: RwLock::new(()),
        })
    }

    /// The underlying backend engine.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Field names this store maintains posting lists for.
    pub fn indexed_fields(&self) -> &[String] {
        &self.indexed_fields
    }

    /// Store a document under `key`, updating every posting list for
    /// indexed fields the document carries.
    ///
    /// The document must be Object-shaped, else
    /// [`Error::InvalidDocument`]. Re-storing the same key is an
    /// overwrite of the payload and an idempotent posting-list update:
    /// a key already listed for a (field, value) pairing is not listed
    /// twice.
    pub fn store(&self, key: &str, document: &Value) -> Result<()> {
        let _guard = self.lock.write();
        let mut txn = self.backend.begin();
        self.store_in_txn(&mut txn, key, document)?;
        txn.commit()?;
        debug!(key, "stored document");
        Ok(())
    }

    /// Fetch the document under `key`, or [`Error::NotFound`].
    ///
    /// Read-only: no transaction, shared lock. The returned value is an
    /// owned copy, never a view into store state.
    pub fn retrieve(&self, key: &str) -> Result<Value> {
        let _guard = self.lock.read();
        let Some(bytes) = self.backend.get(&document_key(key))? else {
            return Err(Error::NotFound {
                key: key.to_string(),
            });
        };
        Ok(folio_codec::decode(&bytes)?)
    }

    /// Delete the document under `key` and unregister it from every
    /// posting list it appears in. Deleting an absent key succeeds.
    ///
    /// A posting list that empties is deleted outright: no index key is
    /// left pointing at an empty list.
    pub fn delete(&self, key: &str) -> Result<()> {
        let _guard = self.lock.write();
        let mut txn = self.backend.begin();
        let doc_key = document_key(key);
        let Some(bytes) = txn.get(&doc_key)? else {
            // idempotent delete: commit the empty transaction
            txn.commit()?;
            return Ok(());
        };
        let document = folio_codec::decode(&bytes)?;
        if let Some(fields) = document.as_object() {
            for field in &self.indexed_fields {
                let Some(value) = fields.get(field) else {
                    continue;
                };
                let bucket = bucket(value)?;
                let index_key = index_key(field, &bucket);
                let Some(bytes) = txn.get(&index_key)? else {
                    continue;
                };
                let mut postings = decode_postings(&bytes, field, &bucket)?;
                postings.retain(|k| k != key);
                if postings.is_empty() {
                    txn.delete(&index_key)?;
                } else {
                    txn.put(&index_key, encode_postings(&postings)?.as_bytes())?;
                }
            }
        }
        txn.delete(&doc_key)?;
        txn.commit()?;
        debug!(key, "deleted document");
        Ok(())
    }

    /// Fetch every document whose indexed `field` equals `value`.
    ///
    /// `field` must be one of the configured indexed fields, else
    /// [`Error::NotIndexed`]. No matching bucket yields an empty vec. A
    /// document listed in the posting list that cannot be fetched or
    /// decoded is skipped with a warning rather than failing the call;
    /// under the shared lock no writer can interleave, so skips only
    /// arise from damage that predates the call.
    pub fn query(&self, field: &str, value: &Value) -> Result<Vec<Value>> {
        let _guard = self.lock.read();
        if !self.indexed_fields.iter().any(|f| f == field) {
            return Err(Error::NotIndexed {
                field: field.to_string(),
            });
        }
        let bucket = bucket(value)?;
        let index_key = index_key(field, &bucket);
        let Some(bytes) = self.backend.get(&index_key)? else {
            return Ok(Vec::new());
        };
        let postings = decode_postings(&bytes, field, &bucket)?;
        let mut results = Vec::with_capacity(postings.len());
        for key in &postings {
            match self.backend.get(&document_key(key)) {
                Ok(Some(bytes)) => match folio_codec::decode(&bytes) {
                    Ok(document) => results.push(document),
                    Err(err) => {
                        warn!(key = key.as_str(), %err, "skipping undecodable document in query");
                    }
                },
                Ok(None) => {
                    warn!(key = key.as_str(), "skipping missing document listed in index");
                }
                Err(err) => {
                    warn!(key = key.as_str(), %err, "skipping unreadable document in query");
                }
            }
        }
        Ok(results)
    }

    /// Store several documents in one transaction.
    ///
    /// `keys` and `documents` pair positionally and must be the same
    /// length. Any single failure — parity, shape, encoding, backend —
    /// aborts the whole batch with nothing committed.
    pub fn batch_store(&self, keys: &[String], documents: &[Value]) -> Result<()> {
        if keys.len() != documents.len() {
            return Err(Error::BatchLengthMismatch {
                keys: keys.len(),
                documents: documents.len(),
            });
        }
        let _guard = self.lock.write();
        let mut txn = self.backend.begin();
        for (key, document) in keys.iter().zip(documents) {
            self.store_in_txn(&mut txn, key, document)?;
        }
        txn.commit()?;
        debug!(count = keys.len(), "stored document batch");
        Ok(())
    }

    /// Fetch several documents by key.
    ///
    /// Absent keys are silently omitted from the result; any other
    /// backend failure, or an undecodable payload, aborts the call.
    pub fn batch_retrieve(&self, keys: &[String]) -> Result<Vec<Value>> {
        let _guard = self.lock.read();
        let mut results = Vec::new();
        for key in keys {
            if let Some(bytes) = self.backend.get(&document_key(key))? {
                results.push(folio_codec::decode(&bytes)?);
            }
        }
        Ok(results)
    }

    /// Close the store, releasing the backend.
    ///
    /// Consumes the store; further operations are a compile error.
    pub fn close(self) -> Result<()> {
        self.backend.close()?;
        Ok(())
    }

    /// Shared write path for `store` and `batch_store`: one document's
    /// payload write plus its posting-list updates, buffered into the
    /// caller's transaction.
    fn store_in_txn(&self, txn: &mut B::Txn<'_>, key: &str, document: &Value) -> Result<()> {
        let Some(fields) = document.as_object() else {
            return Err(Error::InvalidDocument {
                type_name: document.type_name(),
            });
        };
        let payload = folio_codec::encode(document)?;
        txn.put(&document_key(key), payload.as_bytes())?;
        for field in &self.indexed_fields {
            let Some(value) = fields.get(field) else {
                continue;
            };
            let bucket = bucket(value)?;
            let index_key = index_key(field, &bucket);
            let mut postings = match txn.get(&index_key)? {
                Some(bytes) => decode_postings(&bytes, field, &bucket)?,
                None => Vec::new(),
            };
            if !postings.iter().any(|k| k == key) {
                postings.push(key.to_string());
            }
            txn.put(&index_key, encode_postings(&postings)?.as_bytes())?;
        }
        Ok(())
    }
}
