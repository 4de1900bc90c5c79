//! Social posting error types.

/// Kinds of social posting errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SocialErrorKind {
    /// Client authentication failed
    #[display("Authentication failed: {}", _0)]
    Authentication(String),
    /// Media attachment upload failed
    #[display("Media upload failed: {}", _0)]
    MediaUpload(String),
    /// Posting the composed message failed
    #[display("Post failed: {}", _0)]
    Post(String),
    /// No published image was available to post
    #[display("No published image available: {}", _0)]
    NoImage(String),
}

/// Social posting error with location tracking.
///
/// # Examples
///
/// ```
/// use gallerist_error::{SocialError, SocialErrorKind};
///
/// let err = SocialError::new(SocialErrorKind::Post("rate limited".to_string()));
/// assert!(format!("{}", err).contains("rate limited"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Social Error: {} at line {} in {}", kind, line, file)]
pub struct SocialError {
    /// The kind of error that occurred
    pub kind: SocialErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SocialError {
    /// Create a new social posting error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SocialErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
