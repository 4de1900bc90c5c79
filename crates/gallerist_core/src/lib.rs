//! Core data types for the Gallerist image pipeline.
//!
//! This crate defines the tracking record ([`GeneratedImage`]), its lifecycle
//! status ([`ImageStatus`]), the supported image formats ([`ImageFormat`]),
//! and the backend configuration ([`BackendConfig`]) shared by the storage and
//! social crates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod format;
mod image;
mod status;
mod telemetry;

pub use config::BackendConfig;
pub use format::ImageFormat;
pub use image::{
    GeneratedImage, ImagePatch, NewGeneratedImage, META_COMPLETED_AT, META_ERROR_KIND,
    META_FAILED_AT, META_FILENAME, META_PROCESSING_TIME_MS, META_STARTED_AT,
};
pub use status::ImageStatus;
pub use telemetry::init_telemetry;
