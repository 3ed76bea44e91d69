use async_trait::async_trait;

use super::error::StorageError;
use super::key::ObjectKey;

/// Key-addressed object storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key`, replacing any existing object.
    async fn put(&self, key: &ObjectKey, data: &[u8], content_type: &str)
    -> Result<(), StorageError>;

    /// Delete the object stored under `key`.
    ///
    /// Returns `true` if the object was deleted, `false` if it did not exist.
    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError>;
}
