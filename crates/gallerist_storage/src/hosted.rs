//! Hosted HTTP backend for records and blobs.
//!
//! Speaks to a hosted storage/database service exposing PostgREST-style
//! record endpoints under `/rest/v1/{table}` and object endpoints under
//! `/storage/v1/object/{bucket}/{key}`. One client implements both the
//! [`ImageRecordStore`] and [`BlobStorage`] seams.

use crate::{BlobStorage, ImageRecordStore};
use gallerist_core::{BackendConfig, GeneratedImage, ImagePatch, ImageStatus, NewGeneratedImage};
use gallerist_error::{
    ConfigError, GalleristResult, HttpError, RecordError, RecordErrorKind, StorageError,
    StorageErrorKind,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use uuid::Uuid;

/// Client for the hosted record store and blob storage.
///
/// Sends the configured API key as both an `apikey` header and a bearer
/// token, as the hosted service expects. Construct one per process and share
/// it; the underlying `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct HostedClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl HostedClient {
    /// Create a client from backend configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client cannot be built.
    #[tracing::instrument(skip(config), fields(url = %config.url))]
    pub fn new(config: BackendConfig) -> GalleristResult<Self> {
        let mut headers = HeaderMap::new();
        let key_value = HeaderValue::from_str(&config.api_key)
            .map_err(|_| ConfigError::new("API key is not a valid header value"))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| ConfigError::new("API key is not a valid header value"))?;
        headers.insert(HeaderName::from_static("apikey"), key_value);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        tracing::info!(table = %config.table, bucket = %config.bucket, "Created hosted backend client");
        Ok(Self { http, config })
    }

    fn records_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.url, self.config.table)
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.url, self.config.bucket, key
        )
    }

    /// Read the response body for an error status, truncated for logging.
    async fn error_body(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let snippet: String = body.chars().take(200).collect();
        format!("status {}: {}", status, snippet)
    }

    /// Decode a `return=representation` response into its rows.
    async fn decode_rows(response: reqwest::Response) -> GalleristResult<Vec<GeneratedImage>> {
        let rows = response
            .json::<Vec<GeneratedImage>>()
            .await
            .map_err(|e| RecordError::new(RecordErrorKind::Deserialization(e.to_string())))?;
        Ok(rows)
    }
}

#[async_trait::async_trait]
impl ImageRecordStore for HostedClient {
    #[tracing::instrument(skip(self, new), fields(filepath = %new.original_filepath))]
    async fn insert(&self, new: &NewGeneratedImage) -> GalleristResult<GeneratedImage> {
        let response = self
            .http
            .post(self.records_url())
            .header("Prefer", "return=representation")
            .json(new)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("record insert: {}", e)))?;

        if !response.status().is_success() {
            let detail = Self::error_body(response).await;
            return Err(RecordError::new(RecordErrorKind::Insert(detail)).into());
        }

        let mut rows = Self::decode_rows(response).await?;
        if rows.is_empty() {
            return Err(RecordError::new(RecordErrorKind::Insert(
                "empty representation in insert response".to_string(),
            ))
            .into());
        }
        let record = rows.remove(0);
        tracing::debug!(id = %record.id, "inserted tracking record");
        Ok(record)
    }

    #[tracing::instrument(skip(self, patch), fields(id = %id))]
    async fn update(&self, id: Uuid, patch: &ImagePatch) -> GalleristResult<GeneratedImage> {
        let response = self
            .http
            .patch(self.records_url())
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("record update: {}", e)))?;

        if !response.status().is_success() {
            let detail = Self::error_body(response).await;
            return Err(RecordError::new(RecordErrorKind::Update(detail)).into());
        }

        let mut rows = Self::decode_rows(response).await?;
        if rows.is_empty() {
            return Err(RecordError::new(RecordErrorKind::NotFound(id.to_string())).into());
        }
        Ok(rows.remove(0))
    }

    #[tracing::instrument(skip(self))]
    async fn select(
        &self,
        status: Option<ImageStatus>,
        limit: usize,
    ) -> GalleristResult<Vec<GeneratedImage>> {
        let mut query = vec![
            ("order".to_string(), "created_at.desc".to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        if let Some(status) = status {
            query.push(("status".to_string(), format!("eq.{}", status)));
        }

        let response = self
            .http
            .get(self.records_url())
            .query(&query)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("record select: {}", e)))?;

        if !response.status().is_success() {
            let detail = Self::error_body(response).await;
            return Err(RecordError::new(RecordErrorKind::Query(detail)).into());
        }

        Self::decode_rows(response).await
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get(&self, id: Uuid) -> GalleristResult<Option<GeneratedImage>> {
        let response = self
            .http
            .get(self.records_url())
            .query(&[("id", format!("eq.{}", id)), ("limit", "1".to_string())])
            .send()
            .await
            .map_err(|e| HttpError::new(format!("record get: {}", e)))?;

        if !response.status().is_success() {
            let detail = Self::error_body(response).await;
            return Err(RecordError::new(RecordErrorKind::Query(detail)).into());
        }

        let mut rows = Self::decode_rows(response).await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }
}

#[async_trait::async_trait]
impl BlobStorage for HostedClient {
    #[tracing::instrument(skip(self, bytes), fields(key = %key, size = bytes.len()))]
    async fn upload(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
        upsert: bool,
    ) -> GalleristResult<()> {
        let response = self
            .http
            .post(self.object_url(key))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| HttpError::new(format!("blob upload: {}", e)))?;

        if !response.status().is_success() {
            let detail = Self::error_body(response).await;
            return Err(StorageError::new(StorageErrorKind::UploadRejected(detail)).into());
        }

        tracing::info!(key = %key, size = bytes.len(), "uploaded image bytes");
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.url, self.config.bucket, key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HostedClient {
        let config = BackendConfig::new("https://backend.example", "secret");
        HostedClient::new(config).unwrap()
    }

    #[test]
    fn public_url_uses_the_public_object_route() {
        let url = client().public_url("abc_sunset.png");
        assert_eq!(
            url,
            "https://backend.example/storage/v1/object/public/generated-images/abc_sunset.png"
        );
    }

    #[test]
    fn record_and_object_routes_embed_config_names() {
        let client = client();
        assert_eq!(
            client.records_url(),
            "https://backend.example/rest/v1/generated_images"
        );
        assert_eq!(
            client.object_url("k.png"),
            "https://backend.example/storage/v1/object/generated-images/k.png"
        );
    }
}
