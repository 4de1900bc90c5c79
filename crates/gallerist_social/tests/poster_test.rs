//! Tests for the image poster.

use gallerist_error::{GalleristResult, SocialError, SocialErrorKind};
use gallerist_social::{ImagePoster, MediaAttachment, PostReceipt, SocialClient};
use gallerist_storage::{ImageGallery, MemoryBlobStorage, MemoryRecordStore, RetryPolicy};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn png_file(dir: &TempDir, name: &str, total: usize) -> PathBuf {
    let mut bytes = PNG_MAGIC.to_vec();
    bytes.resize(total, 0);
    let path = dir.path().join(name);
    std::fs::write(&path, &bytes).unwrap();
    path
}

fn gallery() -> ImageGallery<MemoryRecordStore, MemoryBlobStorage> {
    ImageGallery::with_policy(
        MemoryRecordStore::new(),
        MemoryBlobStorage::new(),
        RetryPolicy::new(3, Duration::from_millis(1)),
    )
}

/// Fake client that records every post.
#[derive(Default)]
struct RecordingClient {
    posts: Mutex<Vec<(String, Option<MediaAttachment>)>>,
    fail: bool,
}

impl RecordingClient {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl SocialClient for RecordingClient {
    async fn post(
        &self,
        text: &str,
        media: Option<MediaAttachment>,
    ) -> GalleristResult<PostReceipt> {
        if self.fail {
            return Err(SocialError::new(SocialErrorKind::Post("rate limited".to_string())).into());
        }
        let mut posts = self.posts.lock().unwrap();
        posts.push((text.to_string(), media));
        Ok(PostReceipt {
            id: format!("post-{}", posts.len()),
            url: None,
        })
    }
}

#[tokio::test]
async fn posts_the_latest_image_with_caption_and_media() {
    let dir = TempDir::new().unwrap();
    let path = png_file(&dir, "sunset.png", 2048);
    let gallery = gallery();
    gallery.upload(&path, "a sunset over the sea").await.unwrap();

    let poster = ImagePoster::new(gallery, RecordingClient::default());
    let receipt = poster.post_latest().await.expect("post");
    assert_eq!(receipt.id, "post-1");

    let posts = poster.client().posts.lock().unwrap().clone();
    assert_eq!(posts.len(), 1);
    let (caption, media) = &posts[0];
    assert_eq!(caption, "a sunset over the sea");
    let media = media.as_ref().expect("media attached");
    assert_eq!(media.bytes.len(), 2048);
    assert_eq!(media.mime_type, "image/png");
}

#[tokio::test]
async fn no_completed_record_means_no_client_call() {
    let poster = ImagePoster::new(gallery(), RecordingClient::default());
    assert!(poster.post_latest().await.is_none());
    assert_eq!(poster.client().post_count(), 0);
}

#[tokio::test]
async fn client_failure_resolves_to_none() {
    let dir = TempDir::new().unwrap();
    let path = png_file(&dir, "sunset.png", 512);
    let gallery = gallery();
    gallery.upload(&path, "a sunset").await.unwrap();

    let poster = ImagePoster::new(gallery, RecordingClient::failing());
    assert!(poster.post_latest().await.is_none());
}

#[tokio::test]
async fn missing_local_file_without_public_copy_skips_the_post() {
    let dir = TempDir::new().unwrap();
    let path = png_file(&dir, "sunset.png", 512);
    let gallery = gallery();
    gallery.upload(&path, "a sunset").await.unwrap();

    // The local file is gone and memory:// locators are not fetchable.
    std::fs::remove_file(&path).unwrap();

    let poster = ImagePoster::new(gallery, RecordingClient::default());
    assert!(poster.post_latest().await.is_none());
    assert_eq!(poster.client().post_count(), 0);
}

#[tokio::test]
async fn long_prompts_are_posted_truncated() {
    let dir = TempDir::new().unwrap();
    let path = png_file(&dir, "sunset.png", 512);
    let gallery = gallery();
    let prompt = "a very detailed scene ".repeat(30);
    gallery.upload(&path, &prompt).await.unwrap();

    let poster = ImagePoster::new(gallery, RecordingClient::default());
    poster.post_latest().await.expect("post");

    let posts = poster.client().posts.lock().unwrap().clone();
    assert_eq!(posts[0].0.chars().count(), gallerist_social::MAX_CAPTION_CHARS);
}
