//! Provider status reporting types.

use crate::ProviderKind;
use serde::{Deserialize, Serialize};

/// Operational state of one image source.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// Source answered a probe successfully
    #[display("operational")]
    Operational,
    /// Source failed its probe
    #[display("error")]
    Error,
    /// Source has not been probed
    #[display("unknown")]
    Unknown,
}

/// Status of a single provider: probe outcome plus a masked key preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatus {
    /// Probe outcome
    pub status: HealthState,
    /// Human-readable detail ("API connection successful", "Invalid API key")
    pub message: String,
    /// Masked API key, `None` when the provider has no key configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_preview: Option<String>,
}

impl ProviderStatus {
    /// An operational status with the given message.
    pub fn operational(message: impl Into<String>) -> Self {
        Self {
            status: HealthState::Operational,
            message: message.into(),
            key_preview: None,
        }
    }

    /// An error status with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: HealthState::Error,
            message: message.into(),
            key_preview: None,
        }
    }

    /// A not-yet-probed status.
    pub fn unknown() -> Self {
        Self {
            status: HealthState::Unknown,
            message: "Not checked".to_string(),
            key_preview: None,
        }
    }

    /// Attach a masked key preview.
    pub fn with_key_preview(mut self, preview: Option<String>) -> Self {
        self.key_preview = preview;
        self
    }
}

/// Aggregate status across every provider plus the local store.
///
/// Always well-formed: a total provider outage yields `error` entries, never
/// a failure of the report itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    /// Unsplash probe result
    pub unsplash: ProviderStatus,
    /// Pexels probe result
    pub pexels: ProviderStatus,
    /// Pixabay probe result
    pub pixabay: ProviderStatus,
    /// Local store status; operational whenever the process is running
    pub local: ProviderStatus,
}

impl StatusReport {
    /// Set one provider's entry.
    pub fn set(&mut self, kind: ProviderKind, status: ProviderStatus) {
        match kind {
            ProviderKind::Unsplash => self.unsplash = status,
            ProviderKind::Pexels => self.pexels = status,
            ProviderKind::Pixabay => self.pixabay = status,
        }
    }
}

impl Default for StatusReport {
    fn default() -> Self {
        Self {
            unsplash: ProviderStatus::unknown(),
            pexels: ProviderStatus::unknown(),
            pixabay: ProviderStatus::unknown(),
            local: ProviderStatus::operational("Local storage available"),
        }
    }
}

/// Masked key presence report for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyInfo {
    /// Masked key, `None` when absent
    pub key: Option<String>,
    /// Whether a key is configured at all
    pub exists: bool,
}

/// Masked key presence across every provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyReport {
    /// Unsplash key presence
    pub unsplash: ApiKeyInfo,
    /// Pexels key presence
    pub pexels: ApiKeyInfo,
    /// Pixabay key presence
    pub pixabay: ApiKeyInfo,
}
