//! Provider registry.

use crate::{ImageProvider, PexelsClient, PixabayClient, UnsplashClient};
use atelier_core::{ProviderConfig, ProviderKind};
use atelier_error::AtelierResult;
use strum::IntoEnumIterator;

/// One adapter per configured provider, in fixed [`ProviderKind`] order.
///
/// Providers without an API key are simply absent, which is what disables
/// them: the aggregator fans out over whatever the registry holds.
pub struct ProviderRegistry {
    adapters: Vec<Box<dyn ImageProvider>>,
}

impl ProviderRegistry {
    /// Build a registry from the process configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter's HTTP client cannot be initialized.
    pub fn from_config(config: &ProviderConfig) -> AtelierResult<Self> {
        let mut adapters: Vec<Box<dyn ImageProvider>> = Vec::new();
        for kind in ProviderKind::iter() {
            let Some(key) = config.key_for(kind) else {
                continue;
            };
            let adapter: Box<dyn ImageProvider> = match kind {
                ProviderKind::Unsplash => Box::new(UnsplashClient::new(key)?),
                ProviderKind::Pexels => Box::new(PexelsClient::new(key)?),
                ProviderKind::Pixabay => Box::new(PixabayClient::new(key)?),
            };
            adapters.push(adapter);
        }

        tracing::info!(
            configured = ?adapters.iter().map(|a| a.kind()).collect::<Vec<_>>(),
            "Built provider registry"
        );
        Ok(Self { adapters })
    }

    /// A registry over explicit adapters. Used by tests and embedders that
    /// want to swap in their own [`ImageProvider`] implementations.
    pub fn from_adapters(adapters: Vec<Box<dyn ImageProvider>>) -> Self {
        Self { adapters }
    }

    /// The adapter for one provider, if configured.
    pub fn get(&self, kind: ProviderKind) -> Option<&dyn ImageProvider> {
        self.adapters
            .iter()
            .find(|a| a.kind() == kind)
            .map(|a| a.as_ref())
    }

    /// Iterate adapters in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ImageProvider> {
        self.adapters.iter().map(|a| a.as_ref())
    }

    /// Kinds of every configured provider.
    pub fn configured(&self) -> Vec<ProviderKind> {
        self.adapters.iter().map(|a| a.kind()).collect()
    }

    /// Number of configured providers.
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Whether no provider is configured.
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("configured", &self.configured())
            .finish()
    }
}
