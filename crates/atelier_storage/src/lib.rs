//! Section-partitioned local asset storage for Atelier.
//!
//! This crate owns the on-disk layout of locally stored images: one
//! directory per [`Section`](atelier_core::Section) under a configurable
//! root, each asset a pair of files: the binary plus an optional
//! `{filename}.json` metadata sidecar.
//!
//! # Layout
//!
//! ```text
//! /var/atelier/images/
//! ├── blog/
//! │   ├── blog-harbor-1733840000000.jpg
//! │   └── blog-harbor-1733840000000.jpg.json
//! ├── services/
//! ├── showcase/
//! └── imported/
//! ```
//!
//! # Guarantees
//!
//! - **Lazy directories**: section directories are created on first write,
//!   with `mkdir -p` semantics.
//! - **Atomic sidecar writes**: temp file + rename, so a reader never
//!   observes a half-written sidecar.
//! - **Degraded reads**: a missing or corrupt sidecar is empty metadata,
//!   never an error.
//! - **Monotonic filenames**: generated names embed a per-process monotonic
//!   millisecond timestamp.
//!
//! # Example
//!
//! ```rust
//! use atelier_core::Section;
//! use atelier_storage::AssetStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = AssetStore::new("/tmp/atelier-images");
//! let path = store
//!     .save_bytes(Section::Blog, "blog-demo-1.png", b"\x89PNG...")
//!     .await?;
//! assert!(store.exists(&path).await);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filename;
mod sidecar;
mod store;
mod stream;

pub use atelier_error::{StorageError, StorageErrorKind};
pub use filename::{file_extension, file_stem, monotonic_timestamp_ms, sanitize_name};
pub use sidecar::{Metadata, SidecarLocks, read_sidecar, sidecar_path, write_sidecar};
pub use store::{AssetStore, DeleteOutcome};
pub use stream::content_type_for;
