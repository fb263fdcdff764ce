//! The metadata mutator: locate an asset by id, merge a partial update
//! into its sidecar, and write it back.

use crate::service::ImageService;
use atelier_core::Section;
use atelier_error::{AtelierResult, StorageError, StorageErrorKind};
use atelier_storage::{Metadata, read_sidecar, sidecar_path, write_sidecar};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;
use tracing::instrument;

/// Result of a metadata update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataUpdate {
    /// Always true for a returned update; failures are errors instead
    pub success: bool,
    /// The asset id
    pub id: String,
    /// Public URL of the asset
    pub url: String,
    /// The merged sidecar as written
    pub metadata: Metadata,
}

impl ImageService {
    /// Merge `updates` into an asset's sidecar metadata.
    ///
    /// The asset is located by scanning blog, services, and showcase in that
    /// order. The existing sidecar (empty when missing or corrupt) receives
    /// a shallow merge with `updates` winning on conflicts; `section` falls
    /// back to the existing value and then to the detected section; and
    /// `updatedAt` always reflects this call. The read-merge-write cycle
    /// runs under the asset's keyed lock, so concurrent updates to the same
    /// asset serialize instead of losing writes.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when no section contains `id`, and
    /// `StorageError` when the merged sidecar cannot be written back.
    #[instrument(skip(self, updates))]
    pub async fn update_image_metadata(
        &self,
        id: &str,
        updates: Metadata,
    ) -> AtelierResult<MetadataUpdate> {
        let Some((section, filename)) = self.find_asset(id).await else {
            return Err(StorageError::new(StorageErrorKind::NotFound(id.to_string())).into());
        };
        let path = self.store().asset_path(section, &filename);

        let _guard = self.store().locks().lock(&filename).await;

        let mut merged = read_sidecar(&sidecar_path(&path)).await;
        for (key, value) in updates {
            merged.insert(key, value);
        }
        if !merged.contains_key("section") {
            merged.insert("section".into(), json!(section.as_str()));
        }
        merged.insert("updatedAt".into(), json!(crate::ingest::now_rfc3339()));

        write_sidecar(&sidecar_path(&path), &merged).await?;

        Ok(MetadataUpdate {
            success: true,
            url: self.store().image_url(section, &filename),
            id: filename,
            metadata: merged,
        })
    }

    /// Locate an asset by id, returning the first section whose directory
    /// contains it.
    async fn find_asset(&self, id: &str) -> Option<(Section, String)> {
        let filename = Path::new(id).file_name()?.to_str()?.to_string();
        for section in Section::lookup_order() {
            let path = self.store().asset_path(section, &filename);
            if self.store().exists(&path).await {
                return Some((section, filename));
            }
        }
        None
    }
}
