use std::fs::{File, OpenOptions};
use std::path::Path;

use fs2::FileExt;

use crate::error::StorageError;

/// A file-based lock using advisory locking (`flock(2)` on Unix).
///
/// The lock is released automatically when this struct is dropped (the
/// underlying file descriptor is closed).
#[derive(Debug)]
pub struct FileLock {
    _file: File,
}

impl FileLock {
    /// Acquire an exclusive lock on the file at `path`.
    ///
    /// Creates the lock file if it does not exist. Blocks until the lock is acquired.
    pub fn exclusive(path: &Path) -> Result<Self, StorageError> {
        let file = open_lock_file(path)?;
        file.lock_exclusive()
            .map_err(|_| StorageError::Locked(path.display().to_string()))?;
        Ok(Self { _file: file })
    }
}

fn open_lock_file(path: &Path) -> Result<File, StorageError> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;
    Ok(file)
}
