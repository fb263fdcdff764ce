//! Provider adapters for remote stock-photo search APIs.
//!
//! Each adapter translates a free-text query into a normalized list of
//! [`ImageDescriptor`](atelier_core::ImageDescriptor)s and isolates its
//! API's failure modes from callers: `search` never returns an error, it
//! returns an empty [`SearchResults`](atelier_core::SearchResults) carrying
//! the failure message. The [`ProviderRegistry`] holds one adapter per
//! configured API key so the aggregator's fan-out is a plain iteration.
//!
//! # Example
//!
//! ```rust,ignore
//! use atelier_core::ProviderConfig;
//! use atelier_providers::ProviderRegistry;
//!
//! let registry = ProviderRegistry::from_config(&ProviderConfig::from_env())?;
//! for adapter in registry.iter() {
//!     let results = adapter.search("harbor", 1, 10).await;
//!     println!("{}: {} hits", adapter.kind(), results.images.len());
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod pexels;
mod pixabay;
mod registry;
mod unsplash;

use async_trait::async_trait;
use atelier_core::{ProviderKind, ProviderStatus, SearchResults};

pub use pexels::PexelsClient;
pub use pixabay::PixabayClient;
pub use registry::ProviderRegistry;
pub use unsplash::UnsplashClient;

/// Capability interface for one remote image search API.
///
/// Implementations are pure network readers: no side effects, bounded
/// timeouts, and no panics. A broken provider degrades to an empty result
/// set, never an `Err`, so the aggregator can treat every adapter alike.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Search the provider for images matching `query`.
    ///
    /// Transport, auth, and parse failures are captured in the returned
    /// [`SearchResults::error`] field alongside an empty image list.
    async fn search(&self, query: &str, page: u32, per_page: u32) -> SearchResults;

    /// Probe the provider's API with the configured credentials.
    async fn health(&self) -> ProviderStatus;

    /// Which provider this adapter fronts.
    fn kind(&self) -> ProviderKind;
}
