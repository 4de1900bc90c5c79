//! Posting the latest published image.

use crate::{compose_caption, MediaAttachment, PostReceipt, SocialClient};
use gallerist_core::{GeneratedImage, ImageFormat};
use gallerist_error::{GalleristResult, HttpError, SocialError, SocialErrorKind};
use gallerist_storage::{BlobStorage, ImageGallery, ImageRecordStore};
use reqwest::header::CONTENT_TYPE;
use std::path::Path;

/// Posts the most recent completed image through a social client.
///
/// Follows the same swallow-and-log policy as the upload pipeline: every
/// failure resolves to `None` and a log line, never an error.
pub struct ImagePoster<R, B, C> {
    gallery: ImageGallery<R, B>,
    client: C,
    http: reqwest::Client,
}

impl<R, B, C> ImagePoster<R, B, C>
where
    R: ImageRecordStore,
    B: BlobStorage,
    C: SocialClient,
{
    /// Create a poster over a gallery and a social client.
    pub fn new(gallery: ImageGallery<R, B>, client: C) -> Self {
        Self {
            gallery,
            client,
            http: reqwest::Client::new(),
        }
    }

    /// The wrapped gallery, for direct queries.
    pub fn gallery(&self) -> &ImageGallery<R, B> {
        &self.gallery
    }

    /// The wrapped social client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Post the most recently completed image.
    ///
    /// Fetches the latest completed record, loads its bytes, composes a
    /// caption from the stored prompt, and posts. Returns `None` when there
    /// is nothing to post or any step fails; failures are logged.
    #[tracing::instrument(skip(self))]
    pub async fn post_latest(&self) -> Option<PostReceipt> {
        let record = match self.gallery.latest().await {
            Some(record) => record,
            None => {
                tracing::info!("no completed image to post");
                return None;
            }
        };

        let media = match self.load_media(&record).await {
            Ok(media) => media,
            Err(error) => {
                tracing::warn!(id = %record.id, error = %error, "could not load image bytes for post");
                return None;
            }
        };

        let caption = compose_caption(&record.prompt);
        match self.client.post(&caption, Some(media)).await {
            Ok(receipt) => {
                tracing::info!(id = %record.id, post_id = %receipt.id, "posted latest image");
                Some(receipt)
            }
            Err(error) => {
                tracing::warn!(id = %record.id, error = %error, "social post failed");
                None
            }
        }
    }

    /// Load the image bytes for a record.
    ///
    /// Prefers the original local file; falls back to the published copy when
    /// the local file has been cleaned up.
    async fn load_media(&self, record: &GeneratedImage) -> GalleristResult<MediaAttachment> {
        let path = Path::new(&record.original_filepath);
        let local_mime = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageFormat::from_extension)
            .map(|format| format.mime_type())
            .unwrap_or("image/png");

        if let Ok(bytes) = tokio::fs::read(path).await {
            return Ok(MediaAttachment {
                bytes,
                mime_type: local_mime.to_string(),
            });
        }

        if record.storage_path.starts_with("http") {
            let response = self
                .http
                .get(&record.storage_path)
                .send()
                .await
                .map_err(|e| HttpError::new(format!("media fetch: {}", e)))?;
            if !response.status().is_success() {
                return Err(HttpError::new(format!(
                    "media fetch: status {} from {}",
                    response.status(),
                    record.storage_path
                ))
                .into());
            }
            let mime_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or(local_mime)
                .to_string();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| HttpError::new(format!("media fetch: {}", e)))?
                .to_vec();
            return Ok(MediaAttachment { bytes, mime_type });
        }

        Err(SocialError::new(SocialErrorKind::NoImage(record.id.to_string())).into())
    }
}
