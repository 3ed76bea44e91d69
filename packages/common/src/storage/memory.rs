use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::error::StorageError;
use super::key::ObjectKey;
use super::traits::ObjectStore;

#[derive(Debug, Clone)]
struct StoredObject {
    data: Vec<u8>,
    content_type: String,
}

/// In-process object store.
///
/// Used for local development and tests. Records every delete request and can
/// be switched into a failing mode for uploads or deletes.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<ObjectKey, StoredObject>>,
    delete_requests: Mutex<Vec<ObjectKey>>,
    fail_puts: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Keys passed to [`ObjectStore::delete`], in call order, including failed calls.
    pub fn delete_requests(&self) -> Vec<ObjectKey> {
        self.delete_requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn keys(&self) -> Vec<ObjectKey> {
        self.objects
            .lock()
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn data(&self, key: &ObjectKey) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .ok()?
            .get(key)
            .map(|object| object.data.clone())
    }

    pub fn content_type(&self, key: &ObjectKey) -> Option<String> {
        self.objects
            .lock()
            .ok()?
            .get(key)
            .map(|object| object.content_type.clone())
    }

    fn poisoned() -> StorageError {
        StorageError::Backend("memory store lock poisoned".into())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        key: &ObjectKey,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StorageError::Backend(format!("upload rejected for {key}")));
        }
        self.objects.lock().map_err(|_| Self::poisoned())?.insert(
            key.clone(),
            StoredObject {
                data: data.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError> {
        self.delete_requests
            .lock()
            .map_err(|_| Self::poisoned())?
            .push(key.clone());
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend(format!("delete rejected for {key}")));
        }
        Ok(self
            .objects
            .lock()
            .map_err(|_| Self::poisoned())?
            .remove(key)
            .is_some())
    }
}
