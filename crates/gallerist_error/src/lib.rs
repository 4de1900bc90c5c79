//! Error types for the Gallerist image pipeline.
//!
//! This crate provides the foundation error types used throughout the Gallerist
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use gallerist_error::{GalleristResult, HttpError};
//!
//! fn fetch_data() -> GalleristResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod http;
mod config;
mod validation;
mod storage;
mod record;
mod social;
mod error;

pub use http::HttpError;
pub use config::ConfigError;
pub use validation::{ValidationError, ValidationErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use record::{RecordError, RecordErrorKind};
pub use social::{SocialError, SocialErrorKind};
pub use error::{GalleristError, GalleristErrorKind, GalleristResult};
