//! Byte streaming for the serving layer.

use atelier_error::{AtelierResult, StorageError, StorageErrorKind};
use std::path::Path;
use tokio::io::AsyncWrite;

/// Copy a file byte-for-byte into `sink`, returning the byte count.
pub(crate) async fn stream_file<W>(path: &Path, sink: &mut W) -> AtelierResult<u64>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut file = tokio::fs::File::open(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StorageError::new(StorageErrorKind::NotFound(path.display().to_string()))
        } else {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        }
    })?;

    let bytes = tokio::io::copy(&mut file, sink).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;

    tracing::debug!(path = %path.display(), bytes, "Streamed asset");
    Ok(bytes)
}

/// The `Content-Type` to serve a stored asset with, derived from its
/// extension. Unknown extensions fall back to JPEG, matching the default
/// the ingestion pipeline applies.
///
/// # Examples
///
/// ```
/// use atelier_storage::content_type_for;
/// use std::path::Path;
///
/// assert_eq!(content_type_for(Path::new("a.svg")), "image/svg+xml");
/// assert_eq!(content_type_for(Path::new("a.unknown")), "image/jpeg");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "image/jpeg",
    }
}
