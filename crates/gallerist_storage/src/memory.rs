//! In-memory backend for records and blobs.
//!
//! Reference backend used by tests and local runs; mirrors the hosted
//! backend's contracts without any network. Records receive a fresh UUID and
//! timestamp at insert time, the way the hosted service assigns them.

use crate::{BlobStorage, ImageRecordStore};
use chrono::Utc;
use gallerist_core::{GeneratedImage, ImagePatch, ImageStatus, NewGeneratedImage};
use gallerist_error::{
    GalleristResult, RecordError, RecordErrorKind, StorageError, StorageErrorKind,
};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// In-memory tracking record store.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    rows: Mutex<Vec<GeneratedImage>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl ImageRecordStore for MemoryRecordStore {
    async fn insert(&self, new: &NewGeneratedImage) -> GalleristResult<GeneratedImage> {
        let record = GeneratedImage {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            storage_path: new.storage_path.clone(),
            original_filepath: new.original_filepath.clone(),
            prompt: new.prompt.clone(),
            status: new.status,
            error_message: None,
            metadata: new.metadata.clone(),
        };
        self.rows.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, patch: &ImagePatch) -> GalleristResult<GeneratedImage> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RecordError::new(RecordErrorKind::NotFound(id.to_string())))?;

        if let Some(status) = patch.status {
            row.status = status;
        }
        if let Some(storage_path) = &patch.storage_path {
            row.storage_path = storage_path.clone();
        }
        if let Some(error_message) = &patch.error_message {
            row.error_message = Some(error_message.clone());
        }
        if let Some(metadata) = &patch.metadata {
            row.metadata = metadata.clone();
        }
        Ok(row.clone())
    }

    async fn select(
        &self,
        status: Option<ImageStatus>,
        limit: usize,
    ) -> GalleristResult<Vec<GeneratedImage>> {
        let rows = self.rows.lock().unwrap();
        // Reverse insertion order first so the stable sort keeps the newest
        // insert in front when timestamps collide.
        let mut matches: Vec<GeneratedImage> = rows
            .iter()
            .rev()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matches.truncate(limit);
        Ok(matches)
    }

    async fn get(&self, id: Uuid) -> GalleristResult<Option<GeneratedImage>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }
}

/// One stored blob.
#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-memory blob storage.
#[derive(Debug, Default)]
pub struct MemoryBlobStorage {
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl MemoryBlobStorage {
    /// Create an empty blob store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects currently stored.
    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Whether an object exists at the key.
    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    /// Fetch stored bytes and content type for a key.
    pub fn object(&self, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|o| (o.bytes.clone(), o.content_type.clone()))
    }
}

#[async_trait::async_trait]
impl BlobStorage for MemoryBlobStorage {
    async fn upload(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
        upsert: bool,
    ) -> GalleristResult<()> {
        let mut objects = self.objects.lock().unwrap();
        if !upsert && objects.contains_key(key) {
            return Err(StorageError::new(StorageErrorKind::UploadRejected(format!(
                "object already exists at key {}",
                key
            )))
            .into());
        }
        objects.insert(
            key.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("memory://{}", key)
    }
}
