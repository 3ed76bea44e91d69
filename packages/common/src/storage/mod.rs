mod error;
mod key;
mod traits;

pub mod filesystem;
pub mod memory;
#[cfg(feature = "object-storage")]
pub mod s3;

use std::sync::Arc;

pub use error::StorageError;
pub use key::{ObjectKey, PublicUrls};
pub use traits::ObjectStore;

use crate::config::{StorageBackend, StorageConfig};

/// Open the object store selected by `config.backend`.
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>, StorageError> {
    let store: Arc<dyn ObjectStore> = match config.backend {
        StorageBackend::Filesystem => Arc::new(
            filesystem::FilesystemObjectStore::new(config.root.clone(), config.max_upload_size)
                .await?,
        ),
        StorageBackend::Memory => Arc::new(memory::MemoryObjectStore::new()),
        #[cfg(feature = "object-storage")]
        StorageBackend::S3 => Arc::new(s3::S3ObjectStore::new(config)?),
        #[cfg(not(feature = "object-storage"))]
        StorageBackend::S3 => {
            return Err(StorageError::Backend(
                "S3 backend requires the `object-storage` feature".into(),
            ));
        }
    };
    tracing::info!(backend = ?config.backend, bucket = %config.bucket, "Object store ready");
    Ok(store)
}
