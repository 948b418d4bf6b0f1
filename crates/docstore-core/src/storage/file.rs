use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::PersistenceProvider;
use super::lock::FileLock;
use crate::error::StorageError;

/// Directory-backed provider: one `<name>.json` file per key.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a reader sees either the previous blob or the new one.
/// An advisory lock on `<name>.lock` serializes concurrent writers of the same
/// key for the duration of a single `set`/`remove`.
#[derive(Debug, Clone)]
pub struct FileProvider {
    dir: PathBuf,
}

impl FileProvider {
    /// Open (creating if needed) a provider rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// The directory holding the blob files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn blob_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        validate_key(name)?;
        Ok(self.dir.join(format!("{name}.json")))
    }

    fn lock_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.lock"))
    }
}

/// Keys become file names, so anything that could escape the directory is rejected.
fn validate_key(name: &str) -> Result<(), StorageError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');
    if invalid {
        return Err(StorageError::InvalidKey(name.to_string()));
    }
    Ok(())
}

impl PersistenceProvider for FileProvider {
    fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        let path = self.blob_path(name)?;
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, name: &str, blob: &str) -> Result<(), StorageError> {
        let path = self.blob_path(name)?;
        let _lock = FileLock::exclusive(&self.lock_path(name))?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(blob.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), StorageError> {
        let path = self.blob_path(name)?;
        let _lock = FileLock::exclusive(&self.lock_path(name))?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("nested").join("data");
        let provider = FileProvider::open(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(provider.dir(), root.as_path());
    }

    #[test]
    fn test_set_get_remove() {
        let dir = tempdir().unwrap();
        let provider = FileProvider::open(dir.path()).unwrap();

        assert_eq!(provider.get("shop").unwrap(), None);

        provider.set("shop", "{\"tables\":[]}").unwrap();
        assert_eq!(
            provider.get("shop").unwrap().as_deref(),
            Some("{\"tables\":[]}")
        );
        assert!(dir.path().join("shop.json").exists());

        provider.set("shop", "{\"tables\":[{\"name\":\"t\"}]}").unwrap();
        assert_eq!(
            provider.get("shop").unwrap().as_deref(),
            Some("{\"tables\":[{\"name\":\"t\"}]}")
        );

        provider.remove("shop").unwrap();
        assert_eq!(provider.get("shop").unwrap(), None);
        provider.remove("shop").unwrap();
    }

    #[test]
    fn test_persists_across_providers() {
        let dir = tempdir().unwrap();
        FileProvider::open(dir.path())
            .unwrap()
            .set("shop", "blob")
            .unwrap();

        let reopened = FileProvider::open(dir.path()).unwrap();
        assert_eq!(reopened.get("shop").unwrap().as_deref(), Some("blob"));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let provider = FileProvider::open(dir.path()).unwrap();

        for key in ["", ".", "..", "a/b", "a\\b"] {
            match provider.set(key, "x") {
                Err(StorageError::InvalidKey(k)) => assert_eq!(k, key),
                other => panic!("expected InvalidKey for {key:?}, got {other:?}"),
            }
        }
    }
}
