//! Audio settings persisted as a one-byte file.

use kt_engine::ConfigStore;
use log::warn;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::HostError;

/// Settings file holding the raw [`AudioConfig`](kt_core::AudioConfig) byte.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored byte. A missing or empty file is `Ok(None)`.
    pub fn read(&self) -> Result<Option<u8>, HostError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(bytes.first().copied()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn write(&self, raw: u8) -> Result<(), HostError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, [raw])?;
        Ok(())
    }
}

impl ConfigStore for FileStore {
    fn load(&mut self) -> Option<u8> {
        self.read().unwrap_or_else(|err| {
            warn!("reading {}: {}", self.path.display(), err);
            None
        })
    }

    fn store(&mut self, raw: u8) {
        if let Err(err) = self.write(raw) {
            warn!("writing {}: {}", self.path.display(), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("audio.cfg"));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("audio.cfg"));
        store.store(0b11);
        assert_eq!(store.load(), Some(0b11));
        assert_eq!(fs::read(store.path()).unwrap(), [0b11]);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("audio.cfg"));
        store.write(1).unwrap();
        assert_eq!(store.read().unwrap(), Some(1));
    }

    #[test]
    fn empty_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audio.cfg");
        fs::write(&path, []).unwrap();
        assert_eq!(FileStore::new(path).read().unwrap(), None);
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be read as a file
        let store = FileStore::new(dir.path());
        assert!(matches!(store.read(), Err(HostError::Io(_))));
        let mut store = store;
        assert_eq!(store.load(), None);
    }
}
