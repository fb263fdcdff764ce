//! Shared helpers for the service integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use atelier::{
    AssetStore, ImageDescriptor, ImageProvider, ImageService, Metadata, ProviderConfig,
    ProviderKind, ProviderRegistry, ProviderStatus, SearchResults, Section,
};
use tempfile::TempDir;

/// Behavior configuration for mock provider responses.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return one hit per id, labeled with the provider's kind
    Hits(Vec<&'static str>),
    /// Fail softly with the given message
    Fail(&'static str),
}

/// Mock provider adapter.
///
/// Allows tests to control fan-out behavior without network access.
pub struct MockProvider {
    kind: ProviderKind,
    behavior: MockBehavior,
}

impl MockProvider {
    pub fn succeeding(kind: ProviderKind, ids: Vec<&'static str>) -> Box<dyn ImageProvider> {
        Box::new(Self {
            kind,
            behavior: MockBehavior::Hits(ids),
        })
    }

    pub fn failing(kind: ProviderKind, message: &'static str) -> Box<dyn ImageProvider> {
        Box::new(Self {
            kind,
            behavior: MockBehavior::Fail(message),
        })
    }
}

#[async_trait]
impl ImageProvider for MockProvider {
    async fn search(&self, query: &str, _page: u32, _per_page: u32) -> SearchResults {
        match &self.behavior {
            MockBehavior::Hits(ids) => SearchResults::from_images(
                ids.iter()
                    .map(|id| {
                        ImageDescriptor::new(
                            *id,
                            format!("{} ({})", query, id),
                            format!("https://mock.example/{}.jpg", id),
                            self.kind.as_str(),
                        )
                    })
                    .collect(),
            ),
            MockBehavior::Fail(message) => SearchResults::failure(*message),
        }
    }

    async fn health(&self) -> ProviderStatus {
        match &self.behavior {
            MockBehavior::Hits(_) => ProviderStatus::operational("API connection successful"),
            MockBehavior::Fail(message) => ProviderStatus::error(*message),
        }
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }
}

/// A service over a temp-dir store and the given adapters, no real
/// credentials.
pub fn service_with(temp: &TempDir, adapters: Vec<Box<dyn ImageProvider>>) -> ImageService {
    ImageService::new(
        AssetStore::new(temp.path()),
        ProviderRegistry::from_adapters(adapters),
        ProviderConfig::default(),
    )
    .unwrap()
}

/// Store an asset binary, optionally with sidecar metadata.
pub async fn seed_asset(
    service: &ImageService,
    section: Section,
    filename: &str,
    metadata: Option<Metadata>,
) {
    service
        .store()
        .save_bytes(section, filename, b"seeded image bytes")
        .await
        .unwrap();
    if let Some(metadata) = metadata {
        service
            .store()
            .write_metadata(section, filename, &metadata)
            .await
            .unwrap();
    }
}
