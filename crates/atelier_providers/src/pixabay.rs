//! Pixabay search adapter.

use crate::ImageProvider;
use async_trait::async_trait;
use atelier_core::{ImageDescriptor, ProviderKind, ProviderStatus, SearchResults};
use atelier_error::{AtelierResult, HttpError, JsonError};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const BASE_URL: &str = "https://pixabay.com/api/";

/// A hung Pixabay endpoint must not stall the aggregator's fan-out.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Pixabay photo search client.
#[derive(Debug, Clone)]
pub struct PixabayClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<Hit>,
    #[serde(rename = "totalHits")]
    total_hits: u64,
}

#[derive(Debug, Deserialize)]
struct Hit {
    id: u64,
    tags: String,
    #[serde(rename = "largeImageURL")]
    large_image_url: String,
    #[serde(rename = "webformatURL")]
    webformat_url: Option<String>,
    #[serde(rename = "pageURL")]
    page_url: Option<String>,
    user: String,
    user_id: u64,
    #[serde(rename = "imageWidth")]
    image_width: Option<u32>,
    #[serde(rename = "imageHeight")]
    image_height: Option<u32>,
}

impl PixabayClient {
    /// Creates a new Pixabay client with the given API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all)]
    pub fn new(api_key: impl Into<String>) -> AtelierResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
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
        debug!(url = %self.base_url, query = %query, "Sending Pixabay search request");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.clone()),
                ("q", query.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
                ("image_type", "photo".to_string()),
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
            .hits
            .into_iter()
            .map(|hit| {
                let name = hit
                    .tags
                    .split(',')
                    .next()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .unwrap_or("Pixabay image")
                    .to_string();
                let author_url = format!("https://pixabay.com/users/{}-{}/", hit.user, hit.user_id);
                let mut descriptor = ImageDescriptor::new(
                    hit.id.to_string(),
                    name,
                    hit.large_image_url,
                    "pixabay",
                );
                if let Some(webformat) = hit.webformat_url {
                    descriptor.thumbnail_url = webformat;
                }
                descriptor.source_url = hit.page_url;
                descriptor.author_name = Some(hit.user);
                descriptor.author_url = Some(author_url);
                descriptor.width = hit.image_width;
                descriptor.height = hit.image_height;
                descriptor
            })
            .collect();

        Ok(SearchResults {
            images,
            total: parsed.total_hits,
            total_pages: parsed.total_hits.div_ceil(u64::from(per_page.max(1))),
            error: None,
        })
    }
}

#[async_trait]
impl ImageProvider for PixabayClient {
    #[instrument(skip(self), fields(provider = "pixabay"))]
    async fn search(&self, query: &str, page: u32, per_page: u32) -> SearchResults {
        match self.try_search(query, page, per_page).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "Pixabay search failed");
                SearchResults::failure(e.to_string())
            }
        }
    }

    async fn health(&self) -> ProviderStatus {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("key", self.api_key.as_str()), ("per_page", "3")])
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
        ProviderKind::Pixabay
    }
}
