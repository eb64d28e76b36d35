//! Filesystem-backed `PhotoStore` implementation.
//!
//! Photos land under a configurable root directory with a timestamp
//! prefix on the sanitised original filename, so concurrent submissions
//! of the same file do not collide and path traversal in client-supplied
//! names cannot escape the root.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::domain::ports::{PhotoStore, PhotoStoreError, StoredPhoto};

const FALLBACK_NAME: &str = "photo";

/// Stores proof photos as files under a root directory.
#[derive(Clone)]
pub struct FsPhotoStore {
    root: PathBuf,
    public_prefix: String,
}

impl FsPhotoStore {
    /// Create a store rooted at `root`, serving files under
    /// `public_prefix` (e.g. `/uploads`). Creates the root directory if
    /// it does not exist.
    pub async fn new(
        root: impl Into<PathBuf>,
        public_prefix: impl Into<String>,
    ) -> Result<Self, PhotoStoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|err| PhotoStoreError::io(err.to_string()))?;
        Ok(Self {
            root,
            public_prefix: public_prefix.into().trim_end_matches('/').to_owned(),
        })
    }

    /// Directory photos are written to.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Strip path components and replace characters outside
/// `[A-Za-z0-9._-]` so the name is safe to join under the root.
fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original)
        .trim_matches('.');
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        FALLBACK_NAME.to_owned()
    } else {
        cleaned
    }
}

#[async_trait]
impl PhotoStore for FsPhotoStore {
    async fn store(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredPhoto, PhotoStoreError> {
        let file_name = format!(
            "{}_{}",
            Utc::now().timestamp_micros(),
            sanitize_file_name(original_name)
        );
        let path = self.root.join(&file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|err| PhotoStoreError::io(err.to_string()))?;
        debug!(file = %file_name, size = bytes.len(), "photo stored");
        Ok(StoredPhoto {
            public_path: format!("{}/{}", self.public_prefix, file_name),
            file_name,
        })
    }

    async fn remove(&self, file_name: &str) -> Result<(), PhotoStoreError> {
        let path = self.root.join(sanitize_file_name(file_name));
        tokio::fs::remove_file(&path)
            .await
            .map_err(|err| PhotoStoreError::io(err.to_string()))
    }
}
