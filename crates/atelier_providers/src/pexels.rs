//! Pexels search adapter.

use crate::ImageProvider;
use async_trait::async_trait;
use atelier_core::{ImageDescriptor, ProviderKind, ProviderStatus, SearchResults};
use atelier_error::{AtelierResult, HttpError, JsonError};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

const BASE_URL: &str = "https://api.pexels.com";

/// Pexels caps search pagination at 80 results per page.
const MAX_PER_PAGE: u32 = 80;

/// Pexels photo search client.
#[derive(Debug, Clone)]
pub struct PexelsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    photos: Vec<Photo>,
    total_results: u64,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: u64,
    alt: Option<String>,
    src: PhotoSrc,
    url: Option<String>,
    photographer: Option<String>,
    photographer_url: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct PhotoSrc {
    large: String,
    medium: Option<String>,
}

impl PexelsClient {
    /// Creates a new Pexels client with the given API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all)]
    pub fn new(api_key: impl Into<String>) -> AtelierResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        })
    }

    async fn try_search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> AtelierResult<SearchResults> {
        let per_page = per_page.min(MAX_PER_PAGE);
        let url = format!("{}/v1/search", self.base_url);
        debug!(url = %url, query = %query, "Sending Pexels search request");

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[
                ("query", query.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(HttpError::new(format!("API error {}: {}", status, body)).into());
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| JsonError::new(format!("Failed to parse response: {}", e)))?;

        let images = parsed
            .photos
            .into_iter()
            .map(|photo| {
                let name = photo.alt.unwrap_or_else(|| "Pexels image".to_string());
                let mut descriptor =
                    ImageDescriptor::new(photo.id.to_string(), name, photo.src.large, "pexels");
                if let Some(medium) = photo.src.medium {
                    descriptor.thumbnail_url = medium;
                }
                descriptor.source_url = photo.url;
                descriptor.author_name = photo.photographer;
                descriptor.author_url = photo.photographer_url;
                descriptor.width = photo.width;
                descriptor.height = photo.height;
                descriptor
            })
            .collect();

        Ok(SearchResults {
            images,
            total: parsed.total_results,
            total_pages: parsed.total_results.div_ceil(u64::from(per_page.max(1))),
            error: None,
        })
    }
}

#[async_trait]
impl ImageProvider for PexelsClient {
    #[instrument(skip(self), fields(provider = "pexels"))]
    async fn search(&self, query: &str, page: u32, per_page: u32) -> SearchResults {
        match self.try_search(query, page, per_page).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "Pexels search failed");
                SearchResults::failure(e.to_string())
            }
        }
    }

    async fn health(&self) -> ProviderStatus {
        let url = format!("{}/v1/curated", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[("per_page", "1")])
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                ProviderStatus::operational("API connection successful")
            }
            Ok(resp) if resp.status() == StatusCode::UNAUTHORIZED => {
                ProviderStatus::error("Invalid API key")
            }
            Ok(_) | Err(_) => ProviderStatus::error("Connection failed"),
        }
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Pexels
    }
}
