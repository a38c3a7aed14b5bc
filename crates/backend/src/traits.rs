//! Backend adapter contract
//!
//! The document store drives any ordered byte-oriented key/value engine
//! through these two traits. The engine owns durability, compaction and
//! its on-disk format; the store only requires the operations below.
//!
//! ## Transaction discipline
//!
//! `begin` opens a scoped unit of get/put/delete whose writes are
//! buffered until `commit`, which applies them all-or-nothing. Rollback
//! is RAII: dropping an uncommitted transaction discards every pending
//! write. `commit` consumes the transaction, so commit-then-discard
//! cannot be expressed, and dropping a transaction with no pending
//! writes is a no-op.

use thiserror::Error;

/// Errors originating in the backend engine.
///
/// These propagate through the store unchanged; the store adds no
/// interpretation beyond mapping an absent key to its own not-found
/// error where its contract calls for one.
#[derive(Debug, Error)]
pub enum BackendError {
    /// I/O failure in the engine
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data failed an engine integrity check
    #[error("data corruption: {0}")]
    Corruption(String),

    /// Commit could not be applied atomically
    #[error("transaction failed: {0}")]
    Transaction(String),
}

/// Minimal contract the store requires from a key/value engine.
///
/// Implementations must be internally thread-safe: the store serializes
/// writers above this layer but allows concurrent readers.
pub trait Backend {
    /// Transaction type scoped to a borrow of the engine.
    type Txn<'a>: Transaction
    where
        Self: 'a;

    /// Read a value. Absent keys are `Ok(None)`, not an error.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, BackendError>;

    /// Write a value, creating or overwriting the key.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), BackendError>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete(&self, key: &[u8]) -> Result<(), BackendError>;

    /// Open a transaction over the engine's current state.
    fn begin(&self) -> Self::Txn<'_>;

    /// Release the engine's resources.
    fn close(self) -> Result<(), BackendError>;
}

/// A scoped unit of reads and buffered writes.
pub trait Transaction {
    /// Read through the pending view: uncommitted puts and deletes made
    /// by this transaction are visible, base state otherwise.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, BackendError>;

    /// Buffer a write.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), BackendError>;

    /// Buffer a deletion. Deleting an absent key is not an error.
    fn delete(&mut self, key: &[u8]) -> Result<(), BackendError>;

    /// Apply every buffered operation atomically.
    fn commit(self) -> Result<(), BackendError>;

    /// Drop every buffered operation. Equivalent to dropping the
    /// transaction; provided for call sites that want to roll back by
    /// name.
    fn discard(self)
    where
        Self: Sized,
    {
    }
}
