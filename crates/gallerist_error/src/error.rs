//! Top-level error wrapper types.

use crate::{ConfigError, HttpError, RecordError, SocialError, StorageError, ValidationError};

/// This is the foundation error enum for the Gallerist workspace.
///
/// # Examples
///
/// ```
/// use gallerist_error::{GalleristError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: GalleristError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum GalleristErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Local image validation error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Blob storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Tracking record store error
    #[from(RecordError)]
    Record(RecordError),
    /// Social posting error
    #[from(SocialError)]
    Social(SocialError),
}

impl GalleristErrorKind {
    /// Short stable name for the error kind, used in diagnostic metadata.
    pub fn label(&self) -> &'static str {
        match self {
            GalleristErrorKind::Http(_) => "HttpError",
            GalleristErrorKind::Config(_) => "ConfigError",
            GalleristErrorKind::Validation(_) => "ValidationError",
            GalleristErrorKind::Storage(_) => "StorageError",
            GalleristErrorKind::Record(_) => "RecordError",
            GalleristErrorKind::Social(_) => "SocialError",
        }
    }
}

/// Gallerist error with kind discrimination.
///
/// # Examples
///
/// ```
/// use gallerist_error::{GalleristResult, ConfigError};
///
/// fn might_fail() -> GalleristResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Gallerist Error: {}", _0)]
pub struct GalleristError(Box<GalleristErrorKind>);

impl GalleristError {
    /// Create a new error from a kind.
    pub fn new(kind: GalleristErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GalleristErrorKind {
        &self.0
    }

    /// Short stable name for the error kind, used in diagnostic metadata.
    pub fn label(&self) -> &'static str {
        self.0.label()
    }
}

// Generic From implementation for any type that converts to GalleristErrorKind
impl<T> From<T> for GalleristError
where
    T: Into<GalleristErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Gallerist operations.
///
/// # Examples
///
/// ```
/// use gallerist_error::{GalleristResult, HttpError};
///
/// fn fetch_data() -> GalleristResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type GalleristResult<T> = std::result::Result<T, GalleristError>;
