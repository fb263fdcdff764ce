//! Aggregated search across the local store and all configured providers.

use crate::service::ImageService;
use atelier_core::{ProviderFilter, SearchResults};
use atelier_error::{AtelierResult, SearchError, SearchErrorKind};
use futures::future::join_all;
use tracing::{debug, instrument, warn};

impl ImageService {
    /// Search for images locally and/or across the configured providers.
    ///
    /// With [`ProviderFilter::All`] the local store is searched first (it is
    /// cheap and always available), then every configured provider is
    /// queried concurrently and the fan-out waits for all of them to settle.
    /// A provider that fails contributes zero images; local results are
    /// present in the merged output even under total provider outage.
    ///
    /// With a single-source filter the call goes straight to that adapter
    /// (or the local store) and its result shape is returned unmodified.
    /// Unrecognized filters yield an empty result set rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::EmptyQuery` for an empty or whitespace-only
    /// query, before any network or disk activity.
    #[instrument(skip(self), fields(query = %query, filter = ?filter))]
    pub async fn search_images(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
        filter: ProviderFilter,
    ) -> AtelierResult<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::new(SearchErrorKind::EmptyQuery).into());
        }

        match filter {
            ProviderFilter::All => Ok(self.search_all(query, page, per_page).await),
            ProviderFilter::Local => {
                let images = self.store().search_all_sections(query).await;
                Ok(SearchResults::from_images(images))
            }
            ProviderFilter::Provider(kind) => match self.registry().get(kind) {
                Some(adapter) => Ok(adapter.search(query, page, per_page).await),
                None => Ok(SearchResults::failure(format!(
                    "{} API key not configured",
                    kind
                ))),
            },
            ProviderFilter::Unknown(name) => {
                warn!(provider = %name, "Unrecognized provider filter");
                Ok(SearchResults::empty())
            }
        }
    }

    async fn search_all(&self, query: &str, page: u32, per_page: u32) -> SearchResults {
        // Local first: guaranteed present in the merged output no matter
        // what the providers do.
        let mut images = self.store().search_all_sections(query).await;
        let local_hits = images.len();

        let searches = self
            .registry()
            .iter()
            .map(|adapter| adapter.search(query, page, per_page));
        let settled = join_all(searches).await;

        for (adapter, result) in self.registry().iter().zip(settled) {
            if let Some(error) = &result.error {
                warn!(provider = %adapter.kind(), error = %error, "Provider contributed no results");
            }
            images.extend(result.images);
        }

        debug!(
            local = local_hits,
            merged = images.len(),
            "Aggregate search complete"
        );
        SearchResults::from_images(images)
    }
}
