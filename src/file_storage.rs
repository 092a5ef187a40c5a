use crate::{backend::StorageBackend, error::StorageError};
use std::{
    fs,
    io::{ErrorKind, Write},
    path::PathBuf,
    sync::Arc,
};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// One JSON file per key inside a storage directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    directory: Arc<PathBuf>,
}

impl FileStorage {
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        info!(directory = %directory.display(), "Using file storage");
        Ok(Self {
            directory: Arc::new(directory),
        })
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.item_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// The value is written to a temp file next to the target and renamed
    /// over it, so readers never observe a partial write. This blocks on disk
    /// IO; async callers run it through `spawn_blocking`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.item_path(key);
        let mut file = NamedTempFile::new_in(self.directory.as_path())?;
        file.write_all(value.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&path).map_err(|err| err.error)?;
        debug!(path = %path.display(), bytes = value.len(), "Wrote item");
        Ok(())
    }
}
