//! Filename generation helpers.

use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};

/// Extensions the store recognizes as images; everything else (including
/// `.json` sidecars) is invisible to listing and search.
pub(crate) const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "svg"];

static LAST_TIMESTAMP: AtomicI64 = AtomicI64::new(0);

/// Milliseconds since the epoch, strictly increasing within this process.
///
/// Generated filenames embed this value; monotonicity makes collisions
/// within a section practically impossible even when two ingestions land in
/// the same wall-clock millisecond.
pub fn monotonic_timestamp_ms() -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let mut last = LAST_TIMESTAMP.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_TIMESTAMP.compare_exchange_weak(
            last,
            next,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return next,
            Err(observed) => last = observed,
        }
    }
}

/// Sanitize a caller-supplied name for embedding in a generated filename.
///
/// Characters outside `[A-Za-z0-9-_]` become `_`, and the result is
/// truncated to 50 characters. Filename hygiene only; not deduplication.
///
/// # Examples
///
/// ```
/// use atelier_storage::sanitize_name;
///
/// assert_eq!(sanitize_name("harbor at dusk!.jpg"), "harbor_at_dusk__jpg");
/// ```
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(50)
        .collect()
}

/// Whether a directory entry looks like a stored image binary.
pub(crate) fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

/// The lowercase extension of a filename, with leading dot (`".jpg"`), or an
/// empty string when there is none.
///
/// # Examples
///
/// ```
/// use atelier_storage::file_extension;
///
/// assert_eq!(file_extension("photo.JPG"), ".jpg");
/// assert_eq!(file_extension("no-extension"), "");
/// ```
pub fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// The filename stem without its extension.
pub fn file_stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}
