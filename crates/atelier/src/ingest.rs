//! The ingestion pipeline: four entry points converging on validated bytes,
//! a target section, a generated filename, and a metadata sidecar.
//!
//! Every path writes the binary before the sidecar; the sidecar write is
//! best-effort. A saved binary with missing metadata is recoverable, a
//! sidecar without its binary is not, so the binary is the source of truth
//! and a failed sidecar write degrades to a warning.

use crate::service::ImageService;
use atelier_core::Section;
use atelier_error::{AtelierResult, IngestError, IngestErrorKind};
use atelier_storage::{Metadata, file_extension, file_stem, monotonic_timestamp_ms, sanitize_name};
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::{debug, instrument, warn};

/// Extensions a cropped upload may keep; anything else becomes `.jpg`.
const CROP_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// A file the HTTP layer has staged on disk for the upload path.
#[derive(Debug, Clone)]
pub struct StagedUpload {
    /// Where the upload was staged
    pub path: PathBuf,
    /// Filename as supplied by the client
    pub original_name: String,
    /// Declared MIME type
    pub mime_type: String,
    /// Size in bytes
    pub size: u64,
}

/// Free-form fields accompanying an upload or crop request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadForm {
    /// Explicit target section, taking precedence over the metadata blob
    pub section: Option<String>,
    /// JSON-encoded metadata; malformed content degrades to `{}`
    pub metadata: Option<String>,
}

/// A downloaded remote payload, not yet validated or written.
///
/// Splitting the fetch from the store step keeps the content-type gate and
/// extension mapping testable without a network.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    /// Raw response body
    pub bytes: Vec<u8>,
    /// `Content-Type` header, verbatim
    pub content_type: Option<String>,
    /// The URL the payload came from
    pub source_url: String,
}

/// Uniform result of every ingestion entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReceipt {
    /// Always true for a returned receipt; failures are errors instead
    pub success: bool,
    /// Public URL of the stored asset
    pub url: String,
    /// Asset id, which is the generated filename
    pub id: String,
    /// Display name, when the flow has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Stored size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// The sidecar metadata as written (or attempted)
    pub metadata: Metadata,
    /// Section the asset landed in
    pub section: Section,
}

impl ImageService {
    /// Ingest a staged upload.
    ///
    /// Section is taken from the explicit form field, else from the
    /// metadata blob, else defaults to blog. The generated filename embeds
    /// the sanitized original name (or, for services, the metadata
    /// `serviceId`) and keeps the original extension.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the staged file cannot be adopted.
    #[instrument(skip(self, form), fields(original = %upload.original_name))]
    pub async fn handle_general_upload(
        &self,
        upload: StagedUpload,
        form: &UploadForm,
    ) -> AtelierResult<IngestReceipt> {
        let metadata = parse_metadata(form.metadata.as_deref());
        let section = Section::parse_or_default(
            form.section
                .as_deref()
                .or_else(|| metadata.get("section").and_then(Value::as_str)),
        );
        debug!(section = %section, "Processing uploaded image");

        let timestamp = monotonic_timestamp_ms();
        let original_ext = file_extension(&upload.original_name);
        let safe_name = sanitize_name(file_stem(&upload.original_name));
        let prefix = match section {
            Section::Services => {
                let service_id = metadata
                    .get("serviceId")
                    .and_then(Value::as_str)
                    .map(sanitize_name)
                    .unwrap_or_else(|| safe_name.clone());
                format!("service-{}", service_id)
            }
            other => format!("{}-{}", other.filename_prefix(), safe_name),
        };
        let filename = format!("{}-{}{}", prefix, timestamp, original_ext);

        self.store()
            .adopt_staged(section, &filename, &upload.path)
            .await?;

        let mut full = metadata;
        full.insert("originalName".into(), json!(upload.original_name));
        full.insert("uploadedAt".into(), json!(now_rfc3339()));
        full.insert("size".into(), json!(upload.size));
        full.insert("mimeType".into(), json!(upload.mime_type));
        full.insert("section".into(), json!(section.as_str()));
        self.write_sidecar_best_effort(section, &filename, &full)
            .await;

        Ok(IngestReceipt {
            success: true,
            url: self.store().image_url(section, &filename),
            id: filename,
            name: Some(upload.original_name),
            size: Some(upload.size),
            metadata: full,
            section,
        })
    }

    /// Download a remote image and ingest it.
    ///
    /// The download runs under a 30-second timeout with a descriptive
    /// User-Agent. A response whose content type is not `image/*` is
    /// rejected before anything touches the disk.
    ///
    /// # Errors
    ///
    /// Returns `IngestError` for download failures and non-image payloads,
    /// `StorageError` when the binary cannot be written.
    #[instrument(skip(self, metadata), fields(url = %url, section = ?section))]
    pub async fn save_image_from_provider(
        &self,
        url: &str,
        name: &str,
        section: Option<Section>,
        metadata: Metadata,
    ) -> AtelierResult<IngestReceipt> {
        let fetched = self.fetch_remote_image(url).await?;
        self.store_fetched(fetched, name, section.unwrap_or(Section::Imported), metadata)
            .await
    }

    /// Fetch a remote image payload without validating or storing it.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::Download` on transport failure or a non-2xx
    /// response.
    pub async fn fetch_remote_image(&self, url: &str) -> AtelierResult<FetchedImage> {
        let response = self
            .download_client()
            .get(url)
            .header("User-Agent", "Mozilla/5.0 (compatible; Atelier/1.0)")
            .header(
                "Accept",
                "image/webp,image/jpeg,image/png,image/gif,image/*,*/*;q=0.8",
            )
            .send()
            .await
            .map_err(|e| IngestError::new(IngestErrorKind::Download(e.to_string())))?;

        if !response.status().is_success() {
            return Err(IngestError::new(IngestErrorKind::Download(format!(
                "{}: HTTP {}",
                url,
                response.status()
            )))
            .into());
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| IngestError::new(IngestErrorKind::Download(e.to_string())))?
            .to_vec();

        debug!(size = bytes.len(), content_type = ?content_type, "Downloaded remote image");
        Ok(FetchedImage {
            bytes,
            content_type,
            source_url: url.to_string(),
        })
    }

    /// Validate and store an already-downloaded payload.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::InvalidContentType` when the payload is not an
    /// image; no file is written in that case.
    pub async fn store_fetched(
        &self,
        fetched: FetchedImage,
        name: &str,
        section: Section,
        metadata: Metadata,
    ) -> AtelierResult<IngestReceipt> {
        let content_type = fetched.content_type.unwrap_or_default();
        if !content_type.starts_with("image/") {
            return Err(
                IngestError::new(IngestErrorKind::InvalidContentType(content_type)).into(),
            );
        }

        let timestamp = monotonic_timestamp_ms();
        let source = metadata
            .get("source")
            .and_then(Value::as_str)
            .map(sanitize_name)
            .unwrap_or_else(|| "external".to_string());
        let extension = extension_for_mime(&content_type);
        let filename = format!("{}-{}-{}{}", section.as_str(), source, timestamp, extension);
        let image_name = if name.is_empty() {
            format!("{}_image_{}", section.as_str(), timestamp)
        } else {
            name.to_string()
        };
        let size = fetched.bytes.len() as u64;

        self.store()
            .save_bytes(section, &filename, &fetched.bytes)
            .await?;

        let copied_from = metadata
            .get("source")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        let mut full = metadata;
        full.insert("originalUrl".into(), json!(fetched.source_url));
        full.insert("savedAt".into(), json!(now_rfc3339()));
        full.insert("name".into(), json!(image_name));
        full.insert("isLocalCopy".into(), json!(true));
        full.insert("copiedFrom".into(), json!(copied_from));
        full.insert("section".into(), json!(section.as_str()));
        full.insert("mimeType".into(), json!(content_type));
        full.insert("size".into(), json!(size));
        self.write_sidecar_best_effort(section, &filename, &full)
            .await;

        Ok(IngestReceipt {
            success: true,
            url: self.store().image_url(section, &filename),
            id: filename,
            name: Some(image_name),
            size: Some(size),
            metadata: full,
            section,
        })
    }

    /// Ingest a pasted image supplied as a base64 payload.
    ///
    /// Pastes always land in the showcase section; the extension is derived
    /// from the declared MIME subtype and defaults to `png`.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::InvalidPayload` when the base64 cannot be
    /// decoded.
    #[instrument(skip(self, image_base64, metadata), fields(name = %name, mime = %mime_type))]
    pub async fn save_pasted_showcase_image(
        &self,
        image_base64: &str,
        name: &str,
        mime_type: &str,
        metadata: Metadata,
    ) -> AtelierResult<IngestReceipt> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(image_base64.trim())
            .map_err(|e| IngestError::new(IngestErrorKind::InvalidPayload(e.to_string())))?;

        let timestamp = monotonic_timestamp_ms();
        let extension = mime_type
            .split('/')
            .nth(1)
            .filter(|s| !s.is_empty())
            .unwrap_or("png");
        let filename = format!("showcase-pasted-{}.{}", timestamp, extension);
        let section = Section::Showcase;
        let size = bytes.len() as u64;

        self.store().save_bytes(section, &filename, &bytes).await?;

        let mut full = metadata;
        full.insert("originalName".into(), json!(name));
        full.insert("uploadedAt".into(), json!(now_rfc3339()));
        full.insert("mimeType".into(), json!(mime_type));
        full.insert("isPasted".into(), json!(true));
        full.insert("section".into(), json!(section.as_str()));
        full.insert("size".into(), json!(size));
        self.write_sidecar_best_effort(section, &filename, &full)
            .await;

        Ok(IngestReceipt {
            success: true,
            url: self.store().image_url(section, &filename),
            id: filename,
            name: Some(name.to_string()),
            size: Some(size),
            metadata: full,
            section,
        })
    }

    /// Ingest the output of a client-side crop operation.
    ///
    /// The metadata blob names the section, the original asset id, and
    /// optionally the original filename (whose extension is kept when it is
    /// a recognized image extension).
    ///
    /// # Errors
    ///
    /// Returns `IngestError::MissingPayload` for an empty body and
    /// `StorageError` when the binary cannot be written.
    #[instrument(skip(self, bytes, form), fields(size = bytes.len()))]
    pub async fn handle_cropped_image(
        &self,
        bytes: &[u8],
        form: &UploadForm,
    ) -> AtelierResult<IngestReceipt> {
        if bytes.is_empty() {
            return Err(IngestError::new(IngestErrorKind::MissingPayload).into());
        }

        let mut metadata = parse_metadata(form.metadata.as_deref());
        let section =
            Section::parse_or_default(metadata.get("section").and_then(Value::as_str));
        debug!(section = %section, "Processing cropped image");

        let timestamp = monotonic_timestamp_ms();
        let original_ext = file_extension(
            metadata
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("image.jpg"),
        );
        let extension = if CROP_EXTENSIONS.contains(&original_ext.as_str()) {
            original_ext
        } else {
            ".jpg".to_string()
        };

        let filename = match section {
            Section::Showcase => format!("showcase-cropped-{}{}", timestamp, extension),
            Section::Services => {
                let service_id = metadata
                    .get("serviceId")
                    .and_then(Value::as_str)
                    .map(sanitize_name)
                    .unwrap_or_else(|| "unknown".to_string());
                format!("service-{}-cropped-{}{}", service_id, timestamp, extension)
            }
            _ => format!("blog-cropped-{}{}", timestamp, extension),
        };

        metadata.insert("isCropped".into(), json!(true));
        if !metadata.contains_key("originalId") {
            metadata.insert("originalId".into(), Value::Null);
        }
        metadata.insert("cropDate".into(), json!(now_rfc3339()));
        metadata.insert("size".into(), json!(bytes.len()));
        metadata.insert("section".into(), json!(section.as_str()));

        self.store().save_bytes(section, &filename, bytes).await?;
        self.write_sidecar_best_effort(section, &filename, &metadata)
            .await;

        Ok(IngestReceipt {
            success: true,
            url: self.store().image_url(section, &filename),
            id: filename,
            name: None,
            size: Some(bytes.len() as u64),
            metadata,
            section,
        })
    }

    /// Sidecar writes after a successful binary write never fail the
    /// ingestion; the binary is already the asset of record.
    async fn write_sidecar_best_effort(
        &self,
        section: Section,
        filename: &str,
        metadata: &Metadata,
    ) {
        if let Err(e) = self.store().write_metadata(section, filename, metadata).await {
            warn!(
                section = %section,
                filename = %filename,
                error = %e,
                "Failed to write metadata sidecar"
            );
        }
    }
}

/// Parse a JSON-encoded metadata string, degrading malformed input to an
/// empty object.
pub(crate) fn parse_metadata(raw: Option<&str>) -> Metadata {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Metadata::new();
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!("Metadata is not a JSON object, ignoring");
            Metadata::new()
        }
        Err(e) => {
            warn!(error = %e, "Error parsing metadata, ignoring");
            Metadata::new()
        }
    }
}

/// Map a downloaded payload's MIME type to the stored file extension.
///
/// Total and deterministic: unknown types become `.jpg`.
pub(crate) fn extension_for_mime(content_type: &str) -> &'static str {
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    match mime {
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "image/jpeg" => ".jpg",
        "image/svg+xml" => ".svg",
        _ => ".jpg",
    }
}

pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
