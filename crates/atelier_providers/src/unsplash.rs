//! Unsplash search adapter.

use crate::ImageProvider;
use async_trait::async_trait;
use atelier_core::{ImageDescriptor, ProviderKind, ProviderStatus, SearchResults};
use atelier_error::{AtelierResult, HttpError, JsonError};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

const BASE_URL: &str = "https://api.unsplash.com";

/// Unsplash caps search pagination at 30 results per page.
const MAX_PER_PAGE: u32 = 30;

/// Unsplash photo search client.
#[derive(Debug, Clone)]
pub struct UnsplashClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Photo>,
    total: u64,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: String,
    description: Option<String>,
    alt_description: Option<String>,
    urls: PhotoUrls,
    links: PhotoLinks,
    user: User,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
    small: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PhotoLinks {
    html: Option<String>,
}

#[derive(Debug, Deserialize)]
struct User {
    name: Option<String>,
    links: Option<UserLinks>,
}

#[derive(Debug, Deserialize)]
struct UserLinks {
    html: Option<String>,
}

impl UnsplashClient {
    /// Creates a new Unsplash client with the given access key.
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
        let url = format!("{}/search/photos", self.base_url);
        debug!(url = %url, query = %query, "Sending Unsplash search request");

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Client-ID {}", self.api_key))
            .header("Accept-Version", "v1")
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
            .results
            .into_iter()
            .map(|photo| {
                let name = photo
                    .description
                    .or(photo.alt_description)
                    .unwrap_or_else(|| "Unsplash image".to_string());
                let mut descriptor =
                    ImageDescriptor::new(photo.id, name, photo.urls.regular, "unsplash");
                if let Some(small) = photo.urls.small {
                    descriptor.thumbnail_url = small;
                }
                descriptor.source_url = photo.links.html;
                descriptor.author_name = photo.user.name;
                descriptor.author_url = photo.user.links.and_then(|l| l.html);
                descriptor.width = photo.width;
                descriptor.height = photo.height;
                descriptor
            })
            .collect();

        Ok(SearchResults {
            images,
            total: parsed.total,
            total_pages: parsed.total.div_ceil(u64::from(per_page.max(1))),
            error: None,
        })
    }
}

#[async_trait]
impl ImageProvider for UnsplashClient {
    #[instrument(skip(self), fields(provider = "unsplash"))]
    async fn search(&self, query: &str, page: u32, per_page: u32) -> SearchResults {
        match self.try_search(query, page, per_page).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "Unsplash search failed");
                SearchResults::failure(e.to_string())
            }
        }
    }

    async fn health(&self) -> ProviderStatus {
        let url = format!("{}/photos", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Client-ID {}", self.api_key))
            .header("Accept-Version", "v1")
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
        ProviderKind::Unsplash
    }
}
