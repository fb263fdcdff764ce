//! Image descriptors returned from search.

use crate::Section;
use serde::{Deserialize, Serialize};

/// A single search hit, from a remote provider or the local store.
///
/// Descriptors are transient: identity is `(source_label, id)` and nothing is
/// persisted in this shape. A remote descriptor becomes a local asset only by
/// passing through the ingestion pipeline. Fields a provider does not supply
/// stay `None` rather than being defaulted.
///
/// # Examples
///
/// ```
/// use atelier_core::ImageDescriptor;
///
/// let hit = ImageDescriptor::new("abc123", "Harbor at dusk", "https://img/x.jpg", "unsplash");
/// assert_eq!(hit.thumbnail_url, "https://img/x.jpg");
/// assert!(hit.author_name.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDescriptor {
    /// Provider-scoped identifier; for local assets this is the filename
    pub id: String,
    /// Human-readable name or caption
    pub name: String,
    /// Full-size image URL
    pub url: String,
    /// Thumbnail URL (falls back to `url` when the source has no thumbnail)
    pub thumbnail_url: String,
    /// Which provider produced this hit (`"local"`, `"unsplash"`, ...)
    pub source_label: String,
    /// Provider page for the image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Photographer or uploader name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    /// Photographer or uploader profile URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    /// Pixel width, when the provider reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Pixel height, when the provider reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Alt text from local sidecar metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Section a local asset lives in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<Section>,
    /// Upload timestamp from local sidecar metadata (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<String>,
    /// Size in bytes for local assets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl ImageDescriptor {
    /// Create a descriptor with the required fields; the thumbnail defaults
    /// to the full-size URL and every optional field to `None`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        source_label: impl Into<String>,
    ) -> Self {
        let url = url.into();
        Self {
            id: id.into(),
            name: name.into(),
            thumbnail_url: url.clone(),
            url,
            source_label: source_label.into(),
            source_url: None,
            author_name: None,
            author_url: None,
            width: None,
            height: None,
            alt: None,
            section: None,
            uploaded_at: None,
            size: None,
        }
    }
}
