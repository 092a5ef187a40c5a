use crate::error::StorageError;

/// Durable string-keyed storage. A missing key reads as `Ok(None)`.
pub trait StorageBackend: Clone + Send + Sync + 'static {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
