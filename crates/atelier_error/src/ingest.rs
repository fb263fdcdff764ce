//! Ingestion error types.

/// Kinds of ingestion errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum IngestErrorKind {
    /// Downloaded payload is not an image; carries the offending content type
    #[display("Downloaded content is not a valid image ({})", _0)]
    InvalidContentType(String),
    /// Download of a remote image failed
    #[display("Failed to download image: {}", _0)]
    Download(String),
    /// Payload could not be decoded (bad base64, empty body)
    #[display("Invalid image payload: {}", _0)]
    InvalidPayload(String),
    /// No file or byte payload supplied to an ingestion entry point
    #[display("No image data provided")]
    MissingPayload,
}

/// Ingestion error with location tracking.
///
/// # Examples
///
/// ```
/// use atelier_error::{IngestError, IngestErrorKind};
///
/// let err = IngestError::new(IngestErrorKind::InvalidContentType("text/html".to_string()));
/// assert!(format!("{}", err).contains("text/html"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Ingest Error: {} at line {} in {}", kind, line, file)]
pub struct IngestError {
    /// The kind of error that occurred
    pub kind: IngestErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl IngestError {
    /// Create a new ingestion error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: IngestErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
