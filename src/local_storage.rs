use crate::{backend::StorageBackend, error::StorageError};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tracing::debug;

/// Storage that lives as long as the process. Used when no storage directory
/// is configured.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Unavailable)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        debug!(key, bytes = value.len(), "Store item in memory");
        self.items
            .lock()
            .map_err(|_| StorageError::Unavailable)?
            .insert(key.into(), value.into());
        Ok(())
    }
}

/// Stand-in for an environment without durable storage: nothing is ever
/// persisted and every write reports `StorageError::Unavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStorage;

impl StorageBackend for NoStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
