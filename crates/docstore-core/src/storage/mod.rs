//! Key-blob persistence: the provider contract, its implementations, and the
//! document codec.

pub mod codec;
pub mod file;
pub mod lock;
pub mod memory;

pub use file::FileProvider;
pub use memory::MemoryProvider;

use crate::error::StorageError;

/// Abstraction over a key-blob store.
///
/// A database document lives under one key (the database name) as a single
/// textual blob. The store never interprets the blob.
pub trait PersistenceProvider: Send + Sync {
    /// Read the blob stored under `name`, or `None` if nothing is stored.
    fn get(&self, name: &str) -> Result<Option<String>, StorageError>;
    /// Replace the blob stored under `name`.
    fn set(&self, name: &str, blob: &str) -> Result<(), StorageError>;
    /// Remove the blob stored under `name`. Removing an absent key succeeds.
    fn remove(&self, name: &str) -> Result<(), StorageError>;
}
