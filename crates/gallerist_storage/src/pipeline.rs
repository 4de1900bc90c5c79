//! Upload pipeline orchestration and query operations.

use crate::{check_image, run_with_retry, BlobStorage, ImageRecordStore, RetryPolicy};
use chrono::{DateTime, Utc};
use gallerist_core::{
    GeneratedImage, ImagePatch, ImageStatus, NewGeneratedImage, META_COMPLETED_AT,
    META_ERROR_KIND, META_FAILED_AT, META_FILENAME, META_PROCESSING_TIME_MS, META_STARTED_AT,
};
use gallerist_error::{GalleristError, GalleristResult, StorageError, StorageErrorKind};
use reqwest::header::CONTENT_TYPE;
use serde_json::{Map, Value};
use std::path::Path;
use std::time::Instant;
use uuid::Uuid;

/// Diagnostic context captured when an upload fails.
///
/// Capturing is pure and infallible; writing the context back to the record
/// store is a separate, best-effort step so the two concerns stay testable in
/// isolation.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureContext {
    /// Short stable name of the failing error kind
    pub kind: &'static str,
    /// Human-readable failure message
    pub message: String,
    /// When the failure was observed
    pub failed_at: DateTime<Utc>,
    /// Elapsed time since the pipeline started, in milliseconds
    pub elapsed_ms: u64,
}

impl FailureContext {
    /// Capture the context of a pipeline failure.
    pub fn capture(error: &GalleristError, started: Instant) -> Self {
        Self {
            kind: error.label(),
            message: error.to_string(),
            failed_at: Utc::now(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// Build the error-status patch for this failure, augmenting the record's
    /// accumulated metadata with the diagnostics.
    pub fn patch(&self, mut metadata: Map<String, Value>) -> ImagePatch {
        metadata.insert(META_ERROR_KIND.to_string(), Value::from(self.kind));
        metadata.insert(
            META_FAILED_AT.to_string(),
            Value::from(self.failed_at.to_rfc3339()),
        );
        metadata.insert(
            META_PROCESSING_TIME_MS.to_string(),
            Value::from(self.elapsed_ms),
        );
        ImagePatch::failed(self.message.clone(), metadata)
    }
}

/// Upload pipeline over a record store and blob storage.
///
/// Both backends are injected at construction time so tests can substitute
/// the in-memory implementations. The public surface never propagates errors:
/// [`ImageGallery::upload`] and the query operations log failures and resolve
/// to `None`/`false`.
pub struct ImageGallery<R, B> {
    records: R,
    blobs: B,
    probe: reqwest::Client,
    policy: RetryPolicy,
}

impl<R, B> ImageGallery<R, B>
where
    R: ImageRecordStore,
    B: BlobStorage,
{
    /// Create a gallery with the default retry policy.
    pub fn new(records: R, blobs: B) -> Self {
        Self::with_policy(records, blobs, RetryPolicy::default())
    }

    /// Create a gallery with an explicit retry policy.
    pub fn with_policy(records: R, blobs: B, policy: RetryPolicy) -> Self {
        Self {
            records,
            blobs,
            probe: reqwest::Client::new(),
            policy,
        }
    }

    /// The injected record store.
    pub fn records(&self) -> &R {
        &self.records
    }

    /// The injected blob storage.
    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    /// Upload a generated image and track the attempt.
    ///
    /// Runs validation, record creation, byte transfer, and finalization in
    /// sequence; each network-bound step is retried independently. Any
    /// failure resolves to `None`: if a record was already created it is
    /// finalized as `error` with diagnostic metadata (best effort), the
    /// failure is logged, and the original error is discarded.
    #[tracing::instrument(skip(self, prompt), fields(filepath = %filepath.display()))]
    pub async fn upload(&self, filepath: &Path, prompt: &str) -> Option<GeneratedImage> {
        let started = Instant::now();
        let filename = filepath
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        let mut base_metadata = Map::new();
        base_metadata.insert(
            META_STARTED_AT.to_string(),
            Value::from(Utc::now().to_rfc3339()),
        );
        base_metadata.insert(META_FILENAME.to_string(), Value::from(filename.clone()));

        let mut record_id = None;
        let outcome = self
            .upload_inner(filepath, prompt, &filename, &base_metadata, started, &mut record_id)
            .await;

        match outcome {
            Ok(record) => {
                tracing::info!(
                    id = %record.id,
                    storage_path = %record.storage_path,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "published generated image"
                );
                Some(record)
            }
            Err(error) => {
                let context = FailureContext::capture(&error, started);
                tracing::error!(
                    error = %error,
                    kind = context.kind,
                    elapsed_ms = context.elapsed_ms,
                    "image upload failed"
                );
                if let Some(id) = record_id {
                    self.mark_failed(id, &context, base_metadata).await;
                }
                None
            }
        }
    }

    /// The fallible core of [`ImageGallery::upload`].
    ///
    /// Writes the record id into `record_id` as soon as creation succeeds so
    /// the failure handler knows whether an error status must be written.
    async fn upload_inner(
        &self,
        filepath: &Path,
        prompt: &str,
        filename: &str,
        base_metadata: &Map<String, Value>,
        started: Instant,
        record_id: &mut Option<Uuid>,
    ) -> GalleristResult<GeneratedImage> {
        let format = check_image(filepath).await?;

        let mut new = NewGeneratedImage::new(filepath.to_string_lossy().into_owned(), prompt);
        new.metadata = base_metadata.clone();
        let created = run_with_retry(self.policy, || self.records.insert(&new)).await?;
        *record_id = Some(created.id);
        tracing::debug!(id = %created.id, "created tracking record");

        let bytes = tokio::fs::read(filepath).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                filepath.display(),
                e
            )))
        })?;
        let key = format!("{}_{}", created.id, filename);
        run_with_retry(self.policy, || {
            self.blobs.upload(&key, &bytes, format.mime_type(), true)
        })
        .await?;
        let url = self.blobs.public_url(&key);
        tracing::debug!(key = %key, url = %url, "transferred image bytes");

        let mut metadata = created.metadata.clone();
        metadata.insert(
            META_COMPLETED_AT.to_string(),
            Value::from(Utc::now().to_rfc3339()),
        );
        metadata.insert(
            META_PROCESSING_TIME_MS.to_string(),
            Value::from(started.elapsed().as_millis() as u64),
        );
        let patch = ImagePatch::completed(url, metadata);
        let updated = run_with_retry(self.policy, || self.records.update(created.id, &patch)).await?;
        Ok(updated)
    }

    /// Best-effort error-status finalization.
    ///
    /// A failure here is logged and swallowed; the recovery path never raises.
    async fn mark_failed(&self, id: Uuid, context: &FailureContext, metadata: Map<String, Value>) {
        let patch = context.patch(metadata);
        let result = run_with_retry(self.policy, || self.records.update(id, &patch)).await;
        match result {
            Ok(_) => tracing::debug!(id = %id, "marked record as errored"),
            Err(error) => {
                tracing::warn!(id = %id, error = %error, "failed to mark record as errored");
            }
        }
    }

    /// Fetch the most recently created completed record.
    ///
    /// Returns `None` on zero matches or exhausted retries; query failures
    /// are logged, never raised.
    #[tracing::instrument(skip(self))]
    pub async fn latest(&self) -> Option<GeneratedImage> {
        let result = run_with_retry(self.policy, || {
            self.records.select(Some(ImageStatus::Completed), 1)
        })
        .await;
        match result {
            Ok(mut rows) => {
                if rows.is_empty() {
                    tracing::debug!("no completed images in store");
                    None
                } else {
                    Some(rows.remove(0))
                }
            }
            Err(error) => {
                tracing::warn!(error = %error, "failed to query latest image");
                None
            }
        }
    }

    /// Fetch a single record by identifier, same contract as
    /// [`ImageGallery::latest`].
    #[tracing::instrument(skip(self), fields(id = %id))]
    pub async fn get(&self, id: Uuid) -> Option<GeneratedImage> {
        match run_with_retry(self.policy, || self.records.get(id)).await {
            Ok(row) => row,
            Err(error) => {
                tracing::warn!(id = %id, error = %error, "failed to fetch record");
                None
            }
        }
    }

    /// Probe the record's public locator with a HEAD request.
    ///
    /// Returns `true` iff the response indicates success and an image content
    /// type. Network errors collapse to `false`; this never raises.
    #[tracing::instrument(skip(self, record), fields(id = %record.id))]
    pub async fn verify_access(&self, record: &GeneratedImage) -> bool {
        if record.storage_path.is_empty() {
            tracing::debug!("record has no storage path to probe");
            return false;
        }
        match self.probe.head(&record.storage_path).send().await {
            Ok(response) => {
                let status = response.status();
                let content_type = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                let accessible = status.is_success() && content_type.starts_with("image/");
                if !accessible {
                    tracing::warn!(
                        status = %status,
                        content_type = %content_type,
                        "published image is not accessible"
                    );
                }
                accessible
            }
            Err(error) => {
                tracing::warn!(error = %error, "access probe failed");
                false
            }
        }
    }
}
