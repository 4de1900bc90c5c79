//! Upload-with-recovery pipeline for generated images.
//!
//! This crate moves locally generated image files into a hosted backend and
//! tracks each attempt in a record store. The pipeline runs four sequential
//! stages: local validation, tracking record creation, byte transfer with
//! public locator resolution, and status finalization. Every network-bound
//! sub-operation is wrapped in a bounded exponential-backoff retry with its
//! own fresh budget.
//!
//! The record store and blob storage are trait seams ([`ImageRecordStore`],
//! [`BlobStorage`]) so the hosted HTTP backend can be swapped for the
//! in-memory backend in tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use gallerist_storage::{ImageGallery, MemoryBlobStorage, MemoryRecordStore};
//!
//! # async fn example() {
//! let gallery = ImageGallery::new(MemoryRecordStore::new(), MemoryBlobStorage::new());
//!
//! // Returns None on any failure; the record carries the outcome either way.
//! let record = gallery
//!     .upload("/tmp/sunset.png".as_ref(), "a sunset over the sea")
//!     .await;
//!
//! if let Some(record) = record {
//!     println!("published at {}", record.storage_path);
//! }
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod blob;
mod hosted;
mod memory;
mod pipeline;
mod records;
mod retry;
mod validate;

pub use blob::BlobStorage;
pub use hosted::HostedClient;
pub use memory::{MemoryBlobStorage, MemoryRecordStore};
pub use pipeline::{FailureContext, ImageGallery};
pub use records::ImageRecordStore;
pub use retry::{run_with_retry, RetryPolicy};
pub use validate::{check_image, validate_image, MAX_IMAGE_BYTES};
