//! The image service facade.

use atelier_core::{
    ApiKeyInfo, ApiKeyReport, ProviderConfig, ProviderKind, ProviderStatus, Section, StatusReport,
};
use atelier_error::AtelierResult;
use atelier_providers::ProviderRegistry;
use atelier_storage::{AssetStore, DeleteOutcome};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use strum::IntoEnumIterator;
use tokio::io::AsyncWrite;

/// External images are fetched from arbitrary hosts; some are slow, none
/// should stall an ingestion call indefinitely.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Existence report for one section directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionInfo {
    /// The section
    pub section: Section,
    /// Its directory under the store root
    pub dir: PathBuf,
    /// Whether the directory has been created yet
    pub exists: bool,
}

/// Diagnostic report of the store layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageReport {
    /// Store root
    pub root: PathBuf,
    /// Per-section directory state
    pub sections: Vec<SectionInfo>,
}

/// The operations facade over the asset store and the provider registry.
///
/// One instance serves the whole process. Every operation is an async
/// method; cancellation follows tokio semantics: dropping the returned
/// future (as an aborted HTTP request does) cancels in-flight provider
/// calls and downloads at their next await point.
#[derive(Debug)]
pub struct ImageService {
    store: AssetStore,
    registry: ProviderRegistry,
    config: ProviderConfig,
    download_client: reqwest::Client,
}

impl ImageService {
    /// Create a service over an existing store and registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the download HTTP client cannot be initialized.
    pub fn new(
        store: AssetStore,
        registry: ProviderRegistry,
        config: ProviderConfig,
    ) -> AtelierResult<Self> {
        let download_client = reqwest::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .map_err(|e| {
                atelier_error::HttpError::new(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            store,
            registry,
            config,
            download_client,
        })
    }

    /// Create a service rooted at `root` with providers configured from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a provider adapter or the download client cannot
    /// be initialized.
    pub fn from_env(root: impl Into<PathBuf>) -> AtelierResult<Self> {
        let config = ProviderConfig::from_env();
        let registry = ProviderRegistry::from_config(&config)?;
        Self::new(AssetStore::new(root), registry, config)
    }

    /// The underlying asset store.
    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    /// The provider registry.
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub(crate) fn download_client(&self) -> &reqwest::Client {
        &self.download_client
    }

    /// List one section's assets.
    pub async fn list_images(&self, section: Section) -> Vec<atelier_core::ImageDescriptor> {
        self.store.list_images(section).await
    }

    /// Delete an asset from a section. Never throws; a missing asset is a
    /// failure outcome.
    #[tracing::instrument(skip(self), fields(section = %section))]
    pub async fn delete_image(&self, section: Section, id: &str) -> DeleteOutcome {
        self.store.delete_image(section, id).await
    }

    /// Delete a blog asset by id.
    pub async fn delete_blog_image(&self, id: &str) -> DeleteOutcome {
        self.delete_image(Section::Blog, id).await
    }

    /// Stream a stored asset into `sink`.
    ///
    /// The filename is reduced to its base name and stripped of characters
    /// outside `[A-Za-z0-9-_.]` before touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when the asset is missing and no
    /// fallback image is configured.
    #[tracing::instrument(skip(self, sink), fields(section = %section))]
    pub async fn serve_image_file<W>(
        &self,
        section: Section,
        filename: &str,
        sink: &mut W,
    ) -> AtelierResult<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let sanitized = sanitize_serve_filename(filename);
        let path = self.store.asset_path(section, &sanitized);
        self.store.stream_image(&path, sink).await
    }

    /// Probe every configured provider and report per-provider status with
    /// a masked key preview. Never errors; a total outage is a report full
    /// of `error` entries.
    pub async fn provider_status(&self) -> StatusReport {
        let mut report = StatusReport::default();
        for kind in ProviderKind::iter() {
            let status = match self.registry.get(kind) {
                Some(adapter) => adapter.health().await,
                None => ProviderStatus::error("API key not configured"),
            };
            report.set(kind, status.with_key_preview(self.config.masked_key(kind)));
        }
        report
    }

    /// Masked key presence for every provider.
    pub fn api_keys(&self) -> ApiKeyReport {
        let info = |kind: ProviderKind| ApiKeyInfo {
            key: self.config.masked_key(kind),
            exists: self.config.is_configured(kind),
        };
        ApiKeyReport {
            unsplash: info(ProviderKind::Unsplash),
            pexels: info(ProviderKind::Pexels),
            pixabay: info(ProviderKind::Pixabay),
        }
    }

    /// Directory layout diagnostic.
    pub async fn storage_info(&self) -> StorageReport {
        let mut sections = Vec::new();
        for section in [
            Section::Blog,
            Section::Services,
            Section::Showcase,
            Section::Imported,
        ] {
            let dir = self.store.images_dir(section);
            let exists = self.store.exists(&dir).await;
            sections.push(SectionInfo {
                section,
                dir,
                exists,
            });
        }
        StorageReport {
            root: self.store.root().to_path_buf(),
            sections,
        }
    }
}

/// Reduce a caller-supplied filename to a safe base name for serving.
fn sanitize_serve_filename(filename: &str) -> String {
    let base = std::path::Path::new(filename)
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or_default();
    base.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect()
}
