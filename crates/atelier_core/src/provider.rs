//! Provider identifiers and search filters.

use serde::{Deserialize, Serialize};

/// The remote stock-photo providers the pipeline can query.
///
/// # Examples
///
/// ```
/// use atelier_core::ProviderKind;
///
/// let kind: ProviderKind = "pexels".parse().unwrap();
/// assert_eq!(kind.as_str(), "pexels");
/// ```
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
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Unsplash photo search API
    #[display("unsplash")]
    Unsplash,
    /// Pexels photo search API
    #[display("pexels")]
    Pexels,
    /// Pixabay photo search API
    #[display("pixabay")]
    Pixabay,
}

impl ProviderKind {
    /// String form used as the descriptor source label and registry key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Unsplash => "unsplash",
            ProviderKind::Pexels => "pexels",
            ProviderKind::Pixabay => "pixabay",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn env_key(&self) -> &'static str {
        match self {
            ProviderKind::Unsplash => "UNSPLASH_ACCESS_KEY",
            ProviderKind::Pexels => "PEXELS_API_KEY",
            ProviderKind::Pixabay => "PIXABAY_API_KEY",
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unsplash" => Ok(ProviderKind::Unsplash),
            "pexels" => Ok(ProviderKind::Pexels),
            "pixabay" => Ok(ProviderKind::Pixabay),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// Caller-supplied provider selector for a search request.
///
/// Parsing never fails: unrecognized selectors are preserved as `Unknown`
/// so the aggregator can answer them with an empty result set instead of an
/// error, keeping UI callers simple.
///
/// # Examples
///
/// ```
/// use atelier_core::{ProviderFilter, ProviderKind};
///
/// let all: ProviderFilter = "all".parse().unwrap();
/// assert_eq!(all, ProviderFilter::All);
///
/// let one: ProviderFilter = "Pixabay".parse().unwrap();
/// assert_eq!(one, ProviderFilter::Provider(ProviderKind::Pixabay));
///
/// let odd: ProviderFilter = "imgur".parse().unwrap();
/// assert!(matches!(odd, ProviderFilter::Unknown(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderFilter {
    /// Local store plus every configured provider
    All,
    /// Local store only
    Local,
    /// Exactly one remote provider
    Provider(ProviderKind),
    /// Unrecognized selector, answered with empty results
    Unknown(String),
}

impl std::str::FromStr for ProviderFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Ok(match lower.as_str() {
            "all" => ProviderFilter::All,
            "local" => ProviderFilter::Local,
            _ => match lower.parse::<ProviderKind>() {
                Ok(kind) => ProviderFilter::Provider(kind),
                Err(_) => ProviderFilter::Unknown(lower),
            },
        })
    }
}
