//! The section-partitioned asset store.

use crate::filename::is_image_file;
use crate::sidecar::{self, Metadata, SidecarLocks, sidecar_path};
use crate::stream;
use atelier_core::{ImageDescriptor, Section};
use atelier_error::{AtelierResult, StorageError, StorageErrorKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWrite;

/// Outcome of a delete operation.
///
/// Deletes never throw for a missing asset; the outcome says whether the
/// binary was actually removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    /// Whether the asset binary was removed
    pub success: bool,
    /// Failure detail when the binary could not be removed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Local asset store over one directory per [`Section`].
///
/// The store is the single source of truth for what exists locally: every
/// other component resolves directories, URLs, and sidecar paths through it.
/// Section directories are created lazily on first write.
#[derive(Debug, Default)]
pub struct AssetStore {
    root: PathBuf,
    fallback_image: Option<PathBuf>,
    locks: SidecarLocks,
}

impl AssetStore {
    /// Create a store rooted at `root`.
    ///
    /// Nothing touches the filesystem until the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        tracing::info!(root = %root.display(), "Created asset store");
        Self {
            root,
            fallback_image: None,
            locks: SidecarLocks::new(),
        }
    }

    /// Configure a fallback image streamed when a served file is missing.
    pub fn with_fallback_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.fallback_image = Some(path.into());
        self
    }

    /// The store root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Per-asset locks guarding sidecar read-merge-write cycles.
    pub fn locks(&self) -> &SidecarLocks {
        &self.locks
    }

    /// Directory holding a section's assets. Pure; the directory may not
    /// exist yet.
    pub fn images_dir(&self, section: Section) -> PathBuf {
        self.root.join(section.dir_name())
    }

    /// Public URL for a filename in a section. Round-trips with
    /// [`images_dir`](Self::images_dir) under the serving operation.
    pub fn image_url(&self, section: Section, filename: &str) -> String {
        section.url_for(filename)
    }

    /// Full path of an asset binary.
    pub fn asset_path(&self, section: Section, filename: &str) -> PathBuf {
        self.images_dir(section).join(filename)
    }

    /// Non-throwing existence check.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn ensure_dir(&self, dir: &Path) -> AtelierResult<()> {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;
        Ok(())
    }

    /// Write raw bytes as a new asset binary.
    ///
    /// Used by the crop, paste, and external-download ingestion flows.
    /// Writes to a temp file then renames into place.
    #[tracing::instrument(skip(self, bytes), fields(section = %section, size = bytes.len()))]
    pub async fn save_bytes(
        &self,
        section: Section,
        filename: &str,
        bytes: &[u8],
    ) -> AtelierResult<PathBuf> {
        let dir = self.images_dir(section);
        self.ensure_dir(&dir).await?;

        let path = dir.join(filename);
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, bytes).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;
        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(path = %path.display(), size = bytes.len(), "Stored asset binary");
        Ok(path)
    }

    /// Move a staged upload into its final section directory.
    ///
    /// Renames when the staging area shares a filesystem with the store and
    /// falls back to copy-and-remove when it does not.
    #[tracing::instrument(skip(self), fields(section = %section))]
    pub async fn adopt_staged(
        &self,
        section: Section,
        filename: &str,
        staged: &Path,
    ) -> AtelierResult<PathBuf> {
        if !self.exists(staged).await {
            return Err(StorageError::new(StorageErrorKind::FileMove(format!(
                "staged file not found: {}",
                staged.display()
            )))
            .into());
        }

        let dir = self.images_dir(section);
        self.ensure_dir(&dir).await?;
        let path = dir.join(filename);

        if tokio::fs::rename(staged, &path).await.is_err() {
            tokio::fs::copy(staged, &path).await.map_err(|e| {
                StorageError::new(StorageErrorKind::FileMove(format!(
                    "copy {} to {}: {}",
                    staged.display(),
                    path.display(),
                    e
                )))
            })?;
            if let Err(e) = tokio::fs::remove_file(staged).await {
                tracing::warn!(path = %staged.display(), error = %e, "Failed to remove staged file after copy");
            }
        }

        tracing::info!(from = %staged.display(), to = %path.display(), "Adopted staged upload");
        Ok(path)
    }

    /// Read an asset's sidecar metadata, degrading failures to empty.
    pub async fn read_metadata(&self, section: Section, filename: &str) -> Metadata {
        sidecar::read_sidecar(&sidecar_path(&self.asset_path(section, filename))).await
    }

    /// Replace an asset's sidecar metadata.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the sidecar cannot be written.
    pub async fn write_metadata(
        &self,
        section: Section,
        filename: &str,
        metadata: &Metadata,
    ) -> AtelierResult<()> {
        let dir = self.images_dir(section);
        self.ensure_dir(&dir).await?;
        sidecar::write_sidecar(&sidecar_path(&self.asset_path(section, filename)), metadata).await
    }

    /// List a section's assets as local image descriptors.
    ///
    /// Sidecar files and non-image extensions are excluded. A failed
    /// metadata read degrades that entry to defaults; it never drops the
    /// file or fails the listing.
    pub async fn list_images(&self, section: Section) -> Vec<ImageDescriptor> {
        let dir = self.images_dir(section);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(dir = %dir.display(), "Section directory does not exist yet");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Failed to list section directory");
                return Vec::new();
            }
        };

        let mut images = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "Failed to read directory entry");
                    break;
                }
            };

            let path = entry.path();
            if !is_image_file(&path) {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|f| f.to_str()).map(String::from)
            else {
                continue;
            };

            let metadata = sidecar::read_sidecar(&sidecar_path(&path)).await;
            let size = match entry.metadata().await {
                Ok(stat) => Some(stat.len()),
                Err(_) => None,
            };
            images.push(self.descriptor_for(section, &filename, &metadata, size));
        }
        images
    }

    /// Search a section by case-insensitive substring over filename, alt
    /// text, name, and section.
    pub async fn search_images(&self, section: Section, query: &str) -> Vec<ImageDescriptor> {
        let term = query.to_lowercase();
        if term.is_empty() {
            return self.list_images(section).await;
        }
        self.list_images(section)
            .await
            .into_iter()
            .filter(|image| descriptor_matches(image, &term))
            .collect()
    }

    /// Search every scanned section, labeling hits with their section.
    pub async fn search_all_sections(&self, query: &str) -> Vec<ImageDescriptor> {
        let mut images = Vec::new();
        for section in Section::lookup_order() {
            images.extend(self.search_images(section, query).await);
        }
        tracing::debug!(query = %query, hits = images.len(), "Local search complete");
        images
    }

    /// Delete an asset binary and, best-effort, its sidecar.
    ///
    /// A missing binary yields `success: false` without an error; the
    /// sidecar is attempted either way so orphaned metadata does not
    /// accumulate. A sidecar removal failure after the binary is gone is
    /// logged, not surfaced.
    #[tracing::instrument(skip(self), fields(section = %section))]
    pub async fn delete_image(&self, section: Section, id: &str) -> DeleteOutcome {
        let Some(filename) = Path::new(id).file_name().and_then(|f| f.to_str()) else {
            return DeleteOutcome {
                success: false,
                error: Some(format!("Invalid asset id: {}", id)),
            };
        };
        let path = self.asset_path(section, filename);

        let _guard = self.locks.lock(filename).await;

        let outcome = match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Deleted asset binary");
                DeleteOutcome {
                    success: true,
                    error: None,
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Asset not found for deletion");
                DeleteOutcome {
                    success: false,
                    error: Some("Image not found".to_string()),
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to delete asset binary");
                DeleteOutcome {
                    success: false,
                    error: Some(e.to_string()),
                }
            }
        };

        let sidecar = sidecar_path(&path);
        match tokio::fs::remove_file(&sidecar).await {
            Ok(()) => tracing::debug!(path = %sidecar.display(), "Deleted metadata sidecar"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %sidecar.display(), error = %e, "Failed to delete metadata sidecar")
            }
        }

        outcome
    }

    /// Stream an asset byte-for-byte into `sink`.
    ///
    /// A missing path falls back to the configured fallback image when one
    /// exists; otherwise the caller gets `StorageError::NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when neither the asset nor a fallback can be
    /// read.
    pub async fn stream_image<W>(&self, path: &Path, sink: &mut W) -> AtelierResult<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        if self.exists(path).await {
            return stream::stream_file(path, sink).await;
        }
        if let Some(fallback) = &self.fallback_image {
            if self.exists(fallback).await {
                tracing::debug!(
                    missing = %path.display(),
                    fallback = %fallback.display(),
                    "Serving fallback image"
                );
                return stream::stream_file(fallback, sink).await;
            }
        }
        Err(StorageError::new(StorageErrorKind::NotFound(path.display().to_string())).into())
    }

    fn descriptor_for(
        &self,
        section: Section,
        filename: &str,
        metadata: &Metadata,
        size: Option<u64>,
    ) -> ImageDescriptor {
        let str_field = |key: &str| metadata.get(key).and_then(|v| v.as_str()).map(String::from);

        let mut descriptor = ImageDescriptor::new(
            filename,
            str_field("originalName").unwrap_or_else(|| filename.to_string()),
            self.image_url(section, filename),
            "local",
        );
        descriptor.alt = str_field("alt");
        descriptor.section = Some(section);
        descriptor.uploaded_at = str_field("uploadedAt").or_else(|| str_field("savedAt"));
        descriptor.size = size.or_else(|| metadata.get("size").and_then(|v| v.as_u64()));
        descriptor
    }
}

fn descriptor_matches(image: &ImageDescriptor, term: &str) -> bool {
    let contains = |value: &str| value.to_lowercase().contains(term);
    contains(&image.id)
        || contains(&image.name)
        || image.alt.as_deref().is_some_and(contains)
        || image
            .section
            .map(|s| s.as_str().contains(term))
            .unwrap_or(false)
}
