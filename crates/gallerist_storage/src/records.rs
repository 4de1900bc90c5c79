//! Record store trait definition.

use gallerist_core::{GeneratedImage, ImagePatch, ImageStatus, NewGeneratedImage};
use gallerist_error::GalleristResult;
use uuid::Uuid;

/// Trait for pluggable tracking record backends.
///
/// Implementations persist one row per upload attempt; binary content is
/// handled separately by [`crate::BlobStorage`]. The backend assigns `id` and
/// `created_at` at insert time.
#[async_trait::async_trait]
pub trait ImageRecordStore: Send + Sync {
    /// Insert a new tracking record and return it with backend-assigned
    /// identifier and creation timestamp.
    async fn insert(&self, new: &NewGeneratedImage) -> GalleristResult<GeneratedImage>;

    /// Apply a partial update to the record with the given id.
    ///
    /// Fields left unset in the patch are not touched. Returns the updated
    /// record.
    async fn update(&self, id: Uuid, patch: &ImagePatch) -> GalleristResult<GeneratedImage>;

    /// Fetch records ordered by creation time descending.
    ///
    /// # Arguments
    ///
    /// * `status` - Optional status filter
    /// * `limit` - Maximum number of records to return
    async fn select(
        &self,
        status: Option<ImageStatus>,
        limit: usize,
    ) -> GalleristResult<Vec<GeneratedImage>>;

    /// Fetch a single record by identifier.
    ///
    /// Returns `Ok(None)` when no record matches.
    async fn get(&self, id: Uuid) -> GalleristResult<Option<GeneratedImage>>;
}
