use std::fmt;

use super::error::StorageError;

/// A validated, slash-separated object key such as `Jiangong/floor2/A1/1700000000000-photo.jpg`.
///
/// Keys never start or end with `/`, never contain empty, `.` or `..` segments,
/// and never contain backslashes or control characters, so they are safe to map
/// onto a filesystem as well as onto a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn new(key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();
        if key.is_empty() {
            return Err(StorageError::InvalidKey("key is empty".into()));
        }
        if key.chars().any(|c| c.is_control() || c == '\\') {
            return Err(StorageError::InvalidKey(format!(
                "key contains forbidden characters: {key:?}"
            )));
        }
        for segment in key.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(StorageError::InvalidKey(format!(
                    "key has an empty or relative segment: {key:?}"
                )));
            }
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps object keys to the public URLs they are served under, and back.
///
/// Every URL produced here starts with `{base}/`; that prefix is what marks a
/// URL as belonging to this storage domain.
#[derive(Debug, Clone)]
pub struct PublicUrls {
    prefix: String,
}

impl PublicUrls {
    pub fn new(base: &str) -> Self {
        Self {
            prefix: format!("{}/", base.trim_end_matches('/')),
        }
    }

    /// Public URL for `key`, with each segment percent-encoded.
    pub fn url_for(&self, key: &ObjectKey) -> String {
        let encoded: Vec<_> = key.segments().map(urlencoding::encode).collect();
        format!("{}{}", self.prefix, encoded.join("/"))
    }

    /// Recover the object key from a URL produced by [`PublicUrls::url_for`].
    ///
    /// Returns `None` for URLs outside this storage domain or that do not decode
    /// to a valid key.
    pub fn key_for(&self, url: &str) -> Option<ObjectKey> {
        let rest = url.strip_prefix(&self.prefix)?;
        let rest = rest.split(['?', '#']).next().unwrap_or_default();
        let decoded = urlencoding::decode(rest).ok()?;
        ObjectKey::new(decoded.into_owned()).ok()
    }
}
