//! Gallerist - upload and post generated images from chat agents.
//!
//! Gallerist moves locally generated images into a hosted backend and posts
//! them to social platforms. The upload pipeline validates files locally,
//! tracks every attempt in a record store, and recovers from transient
//! backend failures with bounded exponential backoff.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use gallerist::{BackendConfig, HostedClient, ImageGallery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BackendConfig::from_env()?;
//!     let client = HostedClient::new(config)?;
//!     let gallery = ImageGallery::new(client.clone(), client);
//!
//!     let record = gallery
//!         .upload("/tmp/sunset.png".as_ref(), "a sunset over the sea")
//!         .await;
//!     println!("uploaded: {:?}", record);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Gallerist is organized as a workspace with focused crates:
//!
//! - `gallerist_error` - Error types
//! - `gallerist_core` - Core data types (records, statuses, formats, config)
//! - `gallerist_storage` - Upload pipeline, retry executor, backends
//! - `gallerist_social` - Social posting glue
//!
//! This crate (`gallerist`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use gallerist_core::{
    BackendConfig, GeneratedImage, ImageFormat, ImagePatch, ImageStatus, NewGeneratedImage,
    init_telemetry,
};
pub use gallerist_error::{
    ConfigError, GalleristError, GalleristErrorKind, GalleristResult, HttpError, RecordError,
    RecordErrorKind, SocialError, SocialErrorKind, StorageError, StorageErrorKind,
    ValidationError, ValidationErrorKind,
};
pub use gallerist_social::{
    compose_caption, ImagePoster, MediaAttachment, PostReceipt, SocialClient, MAX_CAPTION_CHARS,
};
pub use gallerist_storage::{
    check_image, run_with_retry, validate_image, BlobStorage, FailureContext, HostedClient,
    ImageGallery, ImageRecordStore, MemoryBlobStorage, MemoryRecordStore, RetryPolicy,
    MAX_IMAGE_BYTES,
};
