//! JSON metadata sidecar I/O.
//!
//! Every asset may carry a `{filename}.json` sidecar holding caller-supplied
//! and pipeline-stamped fields. Sidecars are advisory: readers degrade a
//! missing or corrupt sidecar to empty metadata, writers always replace the
//! whole object atomically.

use atelier_error::{AtelierResult, JsonError, StorageError, StorageErrorKind};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Sidecar metadata: an arbitrary JSON object.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// The sidecar path for an asset binary: `{path}.json`.
///
/// # Examples
///
/// ```
/// use atelier_storage::sidecar_path;
/// use std::path::Path;
///
/// let sidecar = sidecar_path(Path::new("/data/blog/a.jpg"));
/// assert_eq!(sidecar, Path::new("/data/blog/a.jpg.json"));
/// ```
pub fn sidecar_path(asset: &Path) -> PathBuf {
    let mut os = asset.as_os_str().to_os_string();
    os.push(".json");
    PathBuf::from(os)
}

/// Read a sidecar, degrading every failure to empty metadata.
///
/// A missing file is the common case for assets placed manually; a corrupt
/// file is logged and treated the same way, per the store's invariant that
/// metadata problems never break reads.
pub async fn read_sidecar(path: &Path) -> Metadata {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Metadata::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read metadata sidecar");
            return Metadata::new();
        }
    };

    match serde_json::from_slice::<serde_json::Value>(&raw) {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(_) => {
            tracing::warn!(path = %path.display(), "Sidecar is not a JSON object, ignoring");
            Metadata::new()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Corrupt metadata sidecar, ignoring");
            Metadata::new()
        }
    }
}

/// Write a complete sidecar object.
///
/// Serializes pretty-printed, writes to a temp file, then renames into
/// place so concurrent readers never observe a partial document.
///
/// # Errors
///
/// Returns `JsonError` if the object cannot be serialized and
/// `StorageError` if the filesystem write fails.
pub async fn write_sidecar(path: &Path, metadata: &Metadata) -> AtelierResult<()> {
    let content = serde_json::to_vec_pretty(metadata)
        .map_err(|e| JsonError::new(format!("{}: {}", path.display(), e)))?;

    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, &content).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            temp_path.display(),
            e
        )))
    })?;

    tokio::fs::rename(&temp_path, path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "rename {} to {}: {}",
            temp_path.display(),
            path.display(),
            e
        )))
    })?;

    tracing::debug!(path = %path.display(), "Wrote metadata sidecar");
    Ok(())
}

/// In-process keyed locks serializing read-merge-write cycles per asset id.
///
/// The sidecar format has no transactional guarantee of its own; two
/// concurrent metadata updates to the same asset would race. Holding the
/// asset's lock across the read, merge, and write closes that window within
/// the process, which is the only writer the deployment model has.
///
/// Lock entries persist for the process lifetime; the table is bounded by
/// the number of distinct asset ids touched.
#[derive(Debug, Default)]
pub struct SidecarLocks {
    inner: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl SidecarLocks {
    /// Create an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for an asset id, waiting if another task holds it.
    pub async fn lock(&self, id: &str) -> OwnedMutexGuard<()> {
        let entry = {
            let mut table = match self.inner.lock() {
                Ok(table) => table,
                Err(poisoned) => poisoned.into_inner(),
            };
            table.entry(id.to_string()).or_default().clone()
        };
        entry.lock_owned().await
    }
}
