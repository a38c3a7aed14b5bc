//! In-memory reference engine
//!
//! `MemoryEngine` implements the backend contract with an ordered map
//! behind a `parking_lot::RwLock`. It is the engine used by the test
//! suites and by embedders that do not need persistence; a durable
//! engine plugs in through the same traits.
//!
//! Transactions buffer a pending write-set (`None` marks a deletion)
//! and apply it under a single write lock at commit, so a commit is
//! atomic with respect to every other reader and writer of the engine.

use crate::traits::{Backend, BackendError, Transaction};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shared-handle in-memory key/value engine.
///
/// Cloning produces another handle onto the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    data: Arc<RwLock<BTreeMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryEngine {
    /// Create a new empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys, all namespaces included.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// True if the engine holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl Backend for MemoryEngine {
    type Txn<'a>
        = MemoryTransaction<'a>
    where
        Self: 'a;

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), BackendError> {
        self.data.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), BackendError> {
        self.data.write().remove(key);
        Ok(())
    }

    fn begin(&self) -> MemoryTransaction<'_> {
        MemoryTransaction {
            engine: self,
            pending: BTreeMap::new(),
        }
    }

    fn close(self) -> Result<(), BackendError> {
        Ok(())
    }
}

/// Buffered write-set over a [`MemoryEngine`].
#[derive(Debug)]
pub struct MemoryTransaction<'a> {
    engine: &'a MemoryEngine,
    /// Pending operations: `Some` is a put, `None` a delete.
    pending: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl Transaction for MemoryTransaction<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, BackendError> {
        if let Some(op) = self.pending.get(key) {
            return Ok(op.clone());
        }
        self.engine.get(key)
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), BackendError> {
        self.pending.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), BackendError> {
        self.pending.insert(key.to_vec(), None);
        Ok(())
    }

    fn commit(self) -> Result<(), BackendError> {
        let mut data = self.engine.data.write();
        for (key, op) in self.pending {
            match op {
                Some(value) => {
                    data.insert(key, value);
                }
                None => {
                    data.remove(&key);
                }
            }
        }
        Ok(())
    }
}
