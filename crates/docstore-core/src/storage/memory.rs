use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::PersistenceProvider;
use crate::error::StorageError;

/// In-memory provider backed by a shared `HashMap`.
///
/// Clones share the same map, so two handles over one provider observe each
/// other's writes (and overwrite each other's documents).
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    blobs: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryProvider {
    /// Create a new empty in-memory provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

impl PersistenceProvider for MemoryProvider {
    fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.read().get(name).cloned())
    }

    fn set(&self, name: &str, blob: &str) -> Result<(), StorageError> {
        self.blobs.write().insert(name.to_string(), blob.to_string());
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), StorageError> {
        self.blobs.write().remove(name);
        Ok(())
    }
}
