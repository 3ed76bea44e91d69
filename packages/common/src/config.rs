use std::path::PathBuf;

use serde::Deserialize;

/// Which [`ObjectStore`](crate::storage::ObjectStore) implementation to open.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Filesystem,
    Memory,
}

/// Object storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Storage backend. Default: "filesystem".
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    /// Bucket name. Default: "shelf-images".
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// URL prefix under which stored objects are publicly served.
    /// Only image URLs under this prefix are ever deleted.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Upload size limit in bytes. Default: 10 MiB.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
    /// S3 endpoint, e.g. "https://<project>.supabase.co/storage/v1/s3".
    /// When unset, `region` is treated as an AWS region name.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// S3 region. Default: "us-east-1".
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Root directory of the filesystem backend. Default: "./data/shelf-images".
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

fn default_backend() -> StorageBackend {
    StorageBackend::Filesystem
}
fn default_bucket() -> String {
    "shelf-images".into()
}
fn default_public_base_url() -> String {
    "http://localhost:10000/images".into()
}
fn default_max_upload_size() -> u64 {
    10 * 1024 * 1024
}
fn default_region() -> String {
    "us-east-1".into()
}
fn default_root() -> PathBuf {
    PathBuf::from("./data/shelf-images")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            bucket: default_bucket(),
            public_base_url: default_public_base_url(),
            max_upload_size: default_max_upload_size(),
            endpoint: None,
            region: default_region(),
            access_key: None,
            secret_key: None,
            root: default_root(),
        }
    }
}
