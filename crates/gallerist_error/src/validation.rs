//! Local image validation error types.

/// Kinds of validation failures.
///
/// Validation runs entirely against the local filesystem before any network
/// call, so every variant here is local and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// File does not exist or is not a regular file
    #[display("File not found: {}", _0)]
    NotFound(String),
    /// File is empty
    #[display("File is empty: {}", _0)]
    Empty(String),
    /// File exceeds the size limit
    #[display("File too large ({} bytes): {}", _1, _0)]
    TooLarge(String, u64),
    /// File extension is not a supported image format
    #[display("Unsupported extension: {}", _0)]
    UnsupportedExtension(String),
    /// File content does not match the expected image signature
    #[display("Content signature does not match extension: {}", _0)]
    SignatureMismatch(String),
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use gallerist_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::Empty("/tmp/blank.png".to_string()));
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
