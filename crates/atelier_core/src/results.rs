//! Search result envelopes.

use crate::ImageDescriptor;
use serde::{Deserialize, Serialize};

/// Results of one search call, from a single adapter or the aggregator.
///
/// Adapters never fail outright: transport, auth, and parse problems are
/// folded into `error` alongside an empty image list, so a broken provider
/// degrades to zero hits instead of aborting the aggregate.
///
/// # Examples
///
/// ```
/// use atelier_core::SearchResults;
///
/// let down = SearchResults::failure("rate limited");
/// assert!(down.images.is_empty());
/// assert_eq!(down.error.as_deref(), Some("rate limited"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Matching images, possibly from several sources
    pub images: Vec<ImageDescriptor>,
    /// Total matches reported by the source
    pub total: u64,
    /// Total pages at the requested page size
    pub total_pages: u64,
    /// Failure message when the source errored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResults {
    /// An empty, error-free result set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An empty result set carrying a failure message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// A result set over an already-complete list of images (local search,
    /// merged aggregates): totals are derived from the list itself.
    pub fn from_images(images: Vec<ImageDescriptor>) -> Self {
        let total = images.len() as u64;
        Self {
            images,
            total,
            total_pages: u64::from(total > 0),
            error: None,
        }
    }
}
