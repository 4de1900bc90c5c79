//! Social platform client trait.

use gallerist_error::GalleristResult;

/// Image bytes attached to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAttachment {
    /// Raw image bytes
    pub bytes: Vec<u8>,
    /// MIME type of the attachment
    pub mime_type: String,
}

/// Identifier of a successfully published post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostReceipt {
    /// Platform-assigned post identifier
    pub id: String,
    /// Public address of the post, when the platform reports one
    pub url: Option<String>,
}

/// Trait for pluggable social platform clients.
///
/// Implementations own authentication and the platform wire protocol; the
/// poster only hands them a caption and optional media.
#[async_trait::async_trait]
pub trait SocialClient: Send + Sync {
    /// Publish a post with an optional media attachment.
    async fn post(
        &self,
        text: &str,
        media: Option<MediaAttachment>,
    ) -> GalleristResult<PostReceipt>;
}
