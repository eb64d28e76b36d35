//! Port abstraction for proof-photo storage.
use async_trait::async_trait;

use super::macros::define_port_error;

define_port_error! {
    /// Storage errors raised by photo store adapters.
    pub enum PhotoStoreError {
        /// Writing or removing the photo failed.
        Io => "photo store I/O failed: {message}",
    }
}

/// A stored photo and the public path it is served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    /// Filename within the store, unique per submission.
    pub file_name: String,
    /// Public reference path (e.g. `/uploads/{file_name}`).
    pub public_path: String,
}

/// Blob storage for proof photos. Bytes are written verbatim; no
/// content-type or size validation happens at this layer.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Persist photo bytes under a collision-resistant name derived from
    /// the original filename.
    async fn store(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredPhoto, PhotoStoreError>;

    /// Remove a previously stored photo. Used for best-effort cleanup
    /// when the database write fails after the photo landed on disk.
    async fn remove(&self, file_name: &str) -> Result<(), PhotoStoreError>;
}
