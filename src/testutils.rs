use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use crate::{
    backend::StorageBackend, configuration::Configuration, error::StorageError, slots::WeekStart,
};

pub struct MockStorageInner {
    pub success: AtomicBool,
    pub calls_to_get_item: AtomicU64,
    pub calls_to_set_item: AtomicU64,
    pub items: Mutex<HashMap<String, String>>,
}

#[derive(Clone)]
pub struct MockStorage(pub Arc<MockStorageInner>);

impl MockStorageInner {
    fn new() -> Self {
        Self {
            success: AtomicBool::new(true),
            calls_to_get_item: AtomicU64::default(),
            calls_to_set_item: AtomicU64::default(),
            items: Mutex::default(),
        }
    }
}

impl MockStorage {
    pub fn new() -> Self {
        Self(Arc::new(MockStorageInner::new()))
    }

    fn result(&self) -> Result<(), StorageError> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(StorageError::Unavailable),
        }
    }
}

impl StorageBackend for MockStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.calls_to_get_item.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(self.0.items.lock().unwrap().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.calls_to_set_item.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        self.0
            .items
            .lock()
            .unwrap()
            .insert(key.into(), value.into());
        Ok(())
    }
}

#[derive(Clone)]
pub struct TestConfiguration {
    pub week_start: WeekStart,
}

impl Configuration for TestConfiguration {
    fn website_title(&self) -> String {
        "Test Calendar".into()
    }

    fn port(&self) -> String {
        "0".into()
    }

    fn storage_dir(&self) -> Option<PathBuf> {
        None
    }

    fn week_start(&self) -> WeekStart {
        self.week_start
    }
}
