//! Shelf photo lifecycle.
//!
//! [`ImageAssets`] is the only component that uploads or deletes stored shelf
//! photos. A save resolves the record's next `image_url` first (uploading when a
//! new file arrives), the caller writes the record, and only then is the
//! superseded object cleaned up. Cleanup is best-effort: its outcome is reported
//! separately from the save and never fails it.

use std::sync::Arc;

use chrono::Utc;
use common::storage::{ObjectKey, ObjectStore, PublicUrls, StorageError};
use tracing::{info, warn};

use crate::utils::branch::BranchMap;
use crate::utils::filename::timestamped_filename;

/// A new photo received with a save request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl ImageUpload {
    fn content_type(&self) -> String {
        self.content_type
            .clone()
            .or_else(|| {
                self.file_name
                    .as_deref()
                    .and_then(|name| mime_guess::from_path(name).first())
                    .map(|m| m.to_string())
            })
            .unwrap_or_else(|| "application/octet-stream".into())
    }
}

/// What a save request asks to happen to the record's photo.
#[derive(Debug, Clone)]
pub enum ImageChange {
    /// Store the upload and point the record at it.
    Replace(ImageUpload),
    /// Clear the record's photo.
    Remove,
    /// Leave the record's photo as it is.
    Keep,
}

impl ImageChange {
    /// A present file always wins over the delete flag.
    pub fn from_request(upload: Option<ImageUpload>, delete_requested: bool) -> Self {
        match (upload, delete_requested) {
            (Some(upload), _) => Self::Replace(upload),
            (None, true) => Self::Remove,
            (None, false) => Self::Keep,
        }
    }
}

/// The shelf slot a photo belongs to; determines its storage path.
#[derive(Debug, Clone, Copy)]
pub struct ShelfSlot<'a> {
    pub branch_name: &'a str,
    pub floor: &'a str,
    pub location: &'a str,
}

/// Result of [`ImageAssets::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    /// Value to write into the record.
    pub image_url: Option<String>,
    /// Previous URL that is no longer referenced once the record is written.
    pub superseded: Option<String>,
    /// URL uploaded by this request, if any.
    pub uploaded: Option<String>,
}

/// Outcome of a best-effort object cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// There was nothing to clean up.
    Nothing,
    /// The object under this key was deleted (or was already gone).
    Deleted(String),
    /// The URL points outside this storage domain and was left alone.
    Foreign(String),
    /// The delete request failed; the object may still exist.
    Failed { key: String, reason: String },
}

/// A completed mandatory operation together with its best-effort cleanup.
///
/// Only `value` is visible to the caller of the HTTP API; `cleanup` is logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted<T> {
    pub value: T,
    pub cleanup: CleanupOutcome,
}

/// Coordinates photo uploads and deletes with the records that reference them.
pub struct ImageAssets {
    store: Arc<dyn ObjectStore>,
    urls: PublicUrls,
    branches: BranchMap,
}

impl ImageAssets {
    pub fn new(store: Arc<dyn ObjectStore>, public_base_url: &str, branches: BranchMap) -> Self {
        Self {
            store,
            urls: PublicUrls::new(public_base_url),
            branches,
        }
    }

    /// Storage key `{branch_code}/floor{floor}/{location}/{millis}-{filename}`.
    pub fn object_key(
        &self,
        slot: ShelfSlot<'_>,
        file_name: Option<&str>,
        millis: i64,
    ) -> Result<ObjectKey, StorageError> {
        ObjectKey::new(format!(
            "{}/floor{}/{}/{}",
            self.branches.code_for(slot.branch_name),
            slot.floor.trim(),
            slot.location.trim(),
            timestamped_filename(millis, file_name),
        ))
    }

    /// Compute the record's next `image_url`, uploading the new photo if there is one.
    ///
    /// `previous` is the URL currently stored on the record, `None` for new records
    /// or when the lookup failed. An upload error aborts with nothing written.
    pub async fn resolve(
        &self,
        change: ImageChange,
        slot: ShelfSlot<'_>,
        previous: Option<&str>,
    ) -> Result<ResolvedImage, StorageError> {
        match change {
            ImageChange::Replace(upload) => {
                let key = self.object_key(
                    slot,
                    upload.file_name.as_deref(),
                    Utc::now().timestamp_millis(),
                )?;
                self.store
                    .put(&key, &upload.data, &upload.content_type())
                    .await?;
                let url = self.urls.url_for(&key);
                info!(key = %key, size = upload.data.len(), "Uploaded shelf image");
                Ok(ResolvedImage {
                    // Never schedule the freshly uploaded object for deletion.
                    superseded: previous.filter(|old| *old != url).map(str::to_string),
                    uploaded: Some(url.clone()),
                    image_url: Some(url),
                })
            }
            ImageChange::Remove => Ok(ResolvedImage {
                image_url: None,
                superseded: previous.map(str::to_string),
                uploaded: None,
            }),
            ImageChange::Keep => Ok(ResolvedImage {
                image_url: previous.map(str::to_string),
                superseded: None,
                uploaded: None,
            }),
        }
    }

    /// Best-effort delete of the object behind `url`.
    ///
    /// URLs outside this storage domain are never touched. Failures are logged
    /// and reported, never returned as errors.
    pub async fn cleanup(&self, url: Option<&str>) -> CleanupOutcome {
        let Some(url) = url.filter(|url| !url.is_empty()) else {
            return CleanupOutcome::Nothing;
        };
        let Some(key) = self.urls.key_for(url) else {
            return CleanupOutcome::Foreign(url.to_string());
        };

        match self.store.delete(&key).await {
            Ok(existed) => {
                info!(key = %key, existed, "Removed stale shelf image");
                CleanupOutcome::Deleted(key.to_string())
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to remove stale shelf image");
                CleanupOutcome::Failed {
                    key: key.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }
}
