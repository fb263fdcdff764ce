//! Atelier - Image Acquisition and Local Asset Pipeline
//!
//! Atelier aggregates image search across several independent stock-photo
//! providers and a section-partitioned local asset store, tolerates partial
//! provider failure, ingests externally-sourced or user-supplied images, and
//! maintains a JSON metadata sidecar per asset.
//!
//! # Features
//!
//! - **Aggregated search**: one query fans out to the local store and every
//!   configured provider concurrently; a failing provider contributes zero
//!   hits instead of failing the aggregate
//! - **Four ingestion paths**: direct upload, external-URL import, pasted
//!   (base64) image, and crop-derived upload, all converging on the same
//!   binary-plus-sidecar layout
//! - **Sidecar metadata**: best-effort, atomically written, merged under a
//!   per-asset lock
//! - **Serving**: byte streaming with an optional fallback image
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use atelier::{AssetStore, ImageService, ProviderConfig, ProviderFilter, ProviderRegistry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProviderConfig::from_env();
//!     let registry = ProviderRegistry::from_config(&config)?;
//!     let store = AssetStore::new("/var/atelier/images");
//!     let service = ImageService::new(store, registry, config)?;
//!
//!     let results = service
//!         .search_images("harbor", 1, 10, ProviderFilter::All)
//!         .await?;
//!     println!("{} hits", results.images.len());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Atelier is organized as a workspace with focused crates:
//!
//! - `atelier_core` - Core data types (descriptors, sections, config)
//! - `atelier_error` - Error types
//! - `atelier_storage` - The section-partitioned local asset store
//! - `atelier_providers` - Provider adapters and the registry
//!
//! This crate (`atelier`) holds the service facade and re-exports everything
//! for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aggregate;
mod ingest;
mod metadata;
mod service;

pub use atelier_core::{
    ApiKeyInfo, ApiKeyReport, HealthState, ImageDescriptor, ProviderConfig, ProviderFilter,
    ProviderKind, ProviderStatus, SearchResults, Section, StatusReport, init_telemetry,
    mask_api_key,
};
pub use atelier_error::{
    AtelierError, AtelierErrorKind, AtelierResult, ConfigError, HttpError, IngestError,
    IngestErrorKind, JsonError, SearchError, SearchErrorKind, StorageError, StorageErrorKind,
};
pub use atelier_providers::{
    ImageProvider, PexelsClient, PixabayClient, ProviderRegistry, UnsplashClient,
};
pub use atelier_storage::{AssetStore, DeleteOutcome, Metadata, content_type_for};

pub use ingest::{FetchedImage, IngestReceipt, StagedUpload, UploadForm};
pub use metadata::MetadataUpdate;
pub use service::{ImageService, SectionInfo, StorageReport};
