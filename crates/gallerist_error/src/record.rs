//! Tracking record store error types.

/// Kinds of record store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RecordErrorKind {
    /// Record insert failed
    #[display("Record insert failed: {}", _0)]
    Insert(String),
    /// Record update failed
    #[display("Record update failed: {}", _0)]
    Update(String),
    /// Record query failed
    #[display("Record query failed: {}", _0)]
    Query(String),
    /// Record not found
    #[display("Record not found: {}", _0)]
    NotFound(String),
    /// Response payload could not be deserialized
    #[display("Deserialization error: {}", _0)]
    Deserialization(String),
}

/// Record store error with location tracking.
///
/// # Examples
///
/// ```
/// use gallerist_error::{RecordError, RecordErrorKind};
///
/// let err = RecordError::new(RecordErrorKind::NotFound("no such id".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Record Error: {} at line {} in {}", kind, line, file)]
pub struct RecordError {
    /// The kind of error that occurred
    pub kind: RecordErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RecordError {
    /// Create a new record store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RecordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
