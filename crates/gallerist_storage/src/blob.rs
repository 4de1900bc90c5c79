//! Blob storage trait definition.

use gallerist_error::GalleristResult;

/// Trait for pluggable blob storage backends.
///
/// Implementations store raw image bytes under a caller-chosen key and
/// resolve a public locator for published objects.
#[async_trait::async_trait]
pub trait BlobStorage: Send + Sync {
    /// Upload bytes under the given key.
    ///
    /// # Arguments
    ///
    /// * `key` - Backend key, unique per upload (`<record id>_<filename>`)
    /// * `bytes` - Raw image bytes
    /// * `content_type` - MIME type to serve the object with
    /// * `upsert` - Whether an existing object at the key may be overwritten
    async fn upload(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
        upsert: bool,
    ) -> GalleristResult<()>;

    /// Resolve the public locator for an object key.
    ///
    /// Pure address computation; does not verify the object exists.
    fn public_url(&self, key: &str) -> String;
}
