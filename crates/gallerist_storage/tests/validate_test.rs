//! Tests for local image validation.

use gallerist_storage::{validate_image, MAX_IMAGE_BYTES};
use std::path::PathBuf;
use tempfile::TempDir;

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_MAGIC: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn png_bytes(total: usize) -> Vec<u8> {
    let mut bytes = PNG_MAGIC.to_vec();
    bytes.resize(total, 0);
    bytes
}

#[tokio::test]
async fn accepts_a_small_png() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "sunset.png", &png_bytes(2048));
    assert!(validate_image(&path).await);
}

#[tokio::test]
async fn accepts_uppercase_extensions() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "SUNSET.PNG", &png_bytes(1024));
    assert!(validate_image(&path).await);
}

#[tokio::test]
async fn accepts_jpeg_and_gif_signatures() {
    let dir = TempDir::new().unwrap();
    let jpg = write_file(&dir, "photo.jpg", &JPEG_MAGIC);
    let jpeg = write_file(&dir, "photo.jpeg", &JPEG_MAGIC);
    let gif = write_file(&dir, "loop.gif", b"GIF89a trailer");
    assert!(validate_image(&jpg).await);
    assert!(validate_image(&jpeg).await);
    assert!(validate_image(&gif).await);
}

#[tokio::test]
async fn rejects_a_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nothing.png");
    assert!(!validate_image(&path).await);
}

#[tokio::test]
async fn rejects_an_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "blank.png", &[]);
    assert!(!validate_image(&path).await);
}

#[tokio::test]
async fn rejects_a_file_over_the_size_limit() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "huge.png", &png_bytes(MAX_IMAGE_BYTES as usize + 1));
    assert!(!validate_image(&path).await);
}

#[tokio::test]
async fn accepts_a_file_exactly_at_the_size_limit() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "full.png", &png_bytes(MAX_IMAGE_BYTES as usize));
    assert!(validate_image(&path).await);
}

#[tokio::test]
async fn rejects_unsupported_extensions() {
    let dir = TempDir::new().unwrap();
    let webp = write_file(&dir, "image.webp", &PNG_MAGIC);
    let none = write_file(&dir, "image", &PNG_MAGIC);
    assert!(!validate_image(&webp).await);
    assert!(!validate_image(&none).await);
}

#[tokio::test]
async fn rejects_extension_and_signature_mismatch() {
    let dir = TempDir::new().unwrap();
    // .png extension over JPEG content must not pass.
    let path = write_file(&dir, "mislabeled.png", &JPEG_MAGIC);
    assert!(!validate_image(&path).await);
}

#[tokio::test]
async fn rejects_content_shorter_than_the_signature() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "stub.png", &[0x89, 0x50]);
    assert!(!validate_image(&path).await);
}
