//! Tracking record types for generated image uploads.

use crate::ImageStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Metadata key: filename derived from the original filepath.
pub const META_FILENAME: &str = "filename";
/// Metadata key: RFC 3339 timestamp captured when the upload started.
pub const META_STARTED_AT: &str = "upload_started_at";
/// Metadata key: RFC 3339 timestamp captured when the upload completed.
pub const META_COMPLETED_AT: &str = "completed_at";
/// Metadata key: RFC 3339 timestamp captured when the upload failed.
pub const META_FAILED_AT: &str = "failed_at";
/// Metadata key: total processing duration in milliseconds, present on every
/// terminal record.
pub const META_PROCESSING_TIME_MS: &str = "processing_time_ms";
/// Metadata key: short name of the error kind that failed the upload.
pub const META_ERROR_KIND: &str = "error_kind";

/// One tracked upload attempt and its outcome.
///
/// Created by the pipeline with status [`ImageStatus::Uploading`] and mutated
/// exactly once more, to `Completed` on success or `Error` on failure. The
/// backend assigns `id` and `created_at` at insert time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Backend-assigned identifier
    pub id: Uuid,
    /// Backend-assigned creation timestamp
    pub created_at: DateTime<Utc>,
    /// Public locator of the published bytes; empty until completion
    #[serde(default)]
    pub storage_path: String,
    /// Source path supplied by the caller
    pub original_filepath: String,
    /// Free-text description supplied by the caller
    pub prompt: String,
    /// Lifecycle status
    pub status: ImageStatus,
    /// Failure diagnostic; present only when status is `error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Open mapping of diagnostic metadata accumulated across the lifecycle
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl GeneratedImage {
    /// Duration recorded under [`META_PROCESSING_TIME_MS`], if present.
    pub fn processing_time_ms(&self) -> Option<u64> {
        self.metadata.get(META_PROCESSING_TIME_MS)?.as_u64()
    }
}

/// Insert payload for a new tracking record.
///
/// New records always start as `uploading` with an empty `storage_path`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGeneratedImage {
    /// Always empty at creation
    pub storage_path: String,
    /// Source path supplied by the caller
    pub original_filepath: String,
    /// Free-text description supplied by the caller
    pub prompt: String,
    /// Always [`ImageStatus::Uploading`]
    pub status: ImageStatus,
    /// Initial metadata (start timestamp, derived filename)
    pub metadata: Map<String, Value>,
}

impl NewGeneratedImage {
    /// Build an insert payload for an upload that starts now.
    pub fn new(original_filepath: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            storage_path: String::new(),
            original_filepath: original_filepath.into(),
            prompt: prompt.into(),
            status: ImageStatus::Uploading,
            metadata: Map::new(),
        }
    }

    /// Attach a metadata entry, builder-style.
    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}

/// Partial update applied to a tracking record.
///
/// Fields left as `None` are not touched by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ImagePatch {
    /// New lifecycle status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ImageStatus>,
    /// Public locator, set on completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
    /// Failure diagnostic, set on error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Replacement metadata mapping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl ImagePatch {
    /// Patch that finalizes a record as completed.
    ///
    /// `metadata` should carry forward the record's existing entries augmented
    /// with completion timestamps and processing duration.
    pub fn completed(storage_path: impl Into<String>, metadata: Map<String, Value>) -> Self {
        Self {
            status: Some(ImageStatus::Completed),
            storage_path: Some(storage_path.into()),
            error_message: None,
            metadata: Some(metadata),
        }
    }

    /// Patch that finalizes a record as failed.
    pub fn failed(error_message: impl Into<String>, metadata: Map<String, Value>) -> Self {
        Self {
            status: Some(ImageStatus::Error),
            storage_path: None,
            error_message: Some(error_message.into()),
            metadata: Some(metadata),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_starts_uploading_with_empty_path() {
        let new = NewGeneratedImage::new("/tmp/sunset.png", "a sunset")
            .with_metadata(META_FILENAME, "sunset.png");

        assert_eq!(new.status, ImageStatus::Uploading);
        assert!(new.storage_path.is_empty());
        assert_eq!(new.metadata[META_FILENAME], "sunset.png");
    }

    #[test]
    fn completed_patch_sets_status_and_path() {
        let patch = ImagePatch::completed("https://cdn.example/img.png", Map::new());
        assert_eq!(patch.status, Some(ImageStatus::Completed));
        assert_eq!(
            patch.storage_path.as_deref(),
            Some("https://cdn.example/img.png")
        );
        assert!(patch.error_message.is_none());
    }

    #[test]
    fn failed_patch_carries_message_without_path() {
        let patch = ImagePatch::failed("upload rejected", Map::new());
        assert_eq!(patch.status, Some(ImageStatus::Error));
        assert!(patch.storage_path.is_none());
        assert_eq!(patch.error_message.as_deref(), Some("upload rejected"));
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = ImagePatch {
            status: Some(ImageStatus::Error),
            error_message: Some("boom".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json.get("storage_path").is_none());
        assert!(json.get("metadata").is_none());
    }
}
