//! Search error types.

/// Kinds of search errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SearchErrorKind {
    /// Query was empty or whitespace-only; rejected before any I/O
    #[display("Search query is required")]
    EmptyQuery,
}

/// Search error with location tracking.
///
/// # Examples
///
/// ```
/// use atelier_error::{SearchError, SearchErrorKind};
///
/// let err = SearchError::new(SearchErrorKind::EmptyQuery);
/// assert!(format!("{}", err).contains("query is required"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Search Error: {} at line {} in {}", kind, line, file)]
pub struct SearchError {
    /// The kind of error that occurred
    pub kind: SearchErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SearchError {
    /// Create a new search error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SearchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
