//! JSON-file-backed network store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::StoreError;
use super::store::{InMemoryStore, NetworkData, NetworkStore};

/// Read and parse a network document from disk.
pub fn load_network_file(path: &Path) -> Result<NetworkData, StoreError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&contents).map_err(|e| StoreError::Json {
        message: format!("{}: {}", path.display(), e),
    })
}

/// A network store that reads its data from a JSON file.
///
/// The file is read once on [`JsonFileStore::open`] and again on each
/// [`NetworkStore::fetch`].
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: InMemoryStore,
}

impl JsonFileStore {
    /// Open the store, failing if the file cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = load_network_file(&path)?;
        Ok(Self {
            path,
            inner: InMemoryStore::new(data),
        })
    }

    /// The file this store reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current document.
    pub fn data(&self) -> Result<Arc<NetworkData>, StoreError> {
        self.inner.data()
    }
}

impl NetworkStore for JsonFileStore {
    fn snapshot(&self) -> Result<Arc<NetworkData>, StoreError> {
        self.inner.snapshot()
    }

    /// Re-read and parse the file.
    ///
    /// The served document only changes on [`NetworkStore::commit`], so a
    /// file that fails to read, parse or build leaves readers where they were.
    fn fetch(&self) -> Result<Arc<NetworkData>, StoreError> {
        load_network_file(&self.path).map(Arc::new)
    }

    fn commit(&self, data: Arc<NetworkData>) -> Result<(), StoreError> {
        self.inner.commit(data)
    }
}
