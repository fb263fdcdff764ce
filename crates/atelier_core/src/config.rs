//! Provider credential configuration.

use crate::ProviderKind;

/// Immutable per-provider API credentials, read once at process start.
///
/// A missing key disables that provider for the lifetime of the process.
/// The config is constructed at startup and passed into the registry by
/// value; adapter logic never reads the environment itself.
///
/// # Examples
///
/// ```
/// use atelier_core::{ProviderConfig, ProviderKind};
///
/// let config = ProviderConfig::default().with_key(ProviderKind::Pexels, "secret-key-123");
/// assert!(config.is_configured(ProviderKind::Pexels));
/// assert!(!config.is_configured(ProviderKind::Unsplash));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    unsplash_access_key: Option<String>,
    pexels_api_key: Option<String>,
    pixabay_api_key: Option<String>,
}

impl ProviderConfig {
    /// Read credentials from the environment, honoring a `.env` file when
    /// present.
    ///
    /// Empty values count as absent.
    pub fn from_env() -> Self {
        // Missing .env is the normal production case.
        let _ = dotenvy::dotenv();

        let read = |kind: ProviderKind| {
            std::env::var(kind.env_key())
                .ok()
                .filter(|v| !v.trim().is_empty())
        };

        let config = Self {
            unsplash_access_key: read(ProviderKind::Unsplash),
            pexels_api_key: read(ProviderKind::Pexels),
            pixabay_api_key: read(ProviderKind::Pixabay),
        };

        tracing::info!(
            unsplash = config.is_configured(ProviderKind::Unsplash),
            pexels = config.is_configured(ProviderKind::Pexels),
            pixabay = config.is_configured(ProviderKind::Pixabay),
            "Loaded provider configuration"
        );

        config
    }

    /// Set one provider's key, builder-style.
    pub fn with_key(mut self, kind: ProviderKind, key: impl Into<String>) -> Self {
        let slot = match kind {
            ProviderKind::Unsplash => &mut self.unsplash_access_key,
            ProviderKind::Pexels => &mut self.pexels_api_key,
            ProviderKind::Pixabay => &mut self.pixabay_api_key,
        };
        *slot = Some(key.into());
        self
    }

    /// The API key for a provider, if configured.
    pub fn key_for(&self, kind: ProviderKind) -> Option<&str> {
        match kind {
            ProviderKind::Unsplash => self.unsplash_access_key.as_deref(),
            ProviderKind::Pexels => self.pexels_api_key.as_deref(),
            ProviderKind::Pixabay => self.pixabay_api_key.as_deref(),
        }
    }

    /// Whether a provider has a key and is therefore enabled.
    pub fn is_configured(&self, kind: ProviderKind) -> bool {
        self.key_for(kind).is_some()
    }

    /// Masked preview of a provider's key for status reporting.
    pub fn masked_key(&self, kind: ProviderKind) -> Option<String> {
        self.key_for(kind).map(mask_api_key)
    }
}

/// Mask an API key for display, revealing the first and last four
/// characters.
///
/// Keys too short to mask meaningfully collapse to `****`.
///
/// # Examples
///
/// ```
/// use atelier_core::mask_api_key;
///
/// assert_eq!(mask_api_key("abcd1234efgh5678"), "abcd********5678");
/// assert_eq!(mask_api_key("short"), "****");
/// ```
pub fn mask_api_key(key: &str) -> String {
    const REVEAL: usize = 4;
    let count = key.chars().count();
    if count <= REVEAL * 2 {
        return "****".to_string();
    }
    let prefix: String = key.chars().take(REVEAL).collect();
    let suffix: String = key.chars().skip(count - REVEAL).collect();
    format!("{}{}{}", prefix, "*".repeat(count - REVEAL * 2), suffix)
}
