//! Social posting of published images.
//!
//! Glue between the upload pipeline and a social platform client: fetch the
//! most recent completed image, load its bytes, compose a caption from the
//! stored prompt, and post. The wire client is an external collaborator
//! behind the [`SocialClient`] trait so tests can substitute a recording
//! fake.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod caption;
mod client;
mod poster;

pub use caption::{compose_caption, MAX_CAPTION_CHARS};
pub use client::{MediaAttachment, PostReceipt, SocialClient};
pub use poster::ImagePoster;
