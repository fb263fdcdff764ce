//! Error types for the Atelier image pipeline.
//!
//! This crate provides the foundation error types used throughout the Atelier
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use atelier_error::{AtelierResult, HttpError};
//!
//! fn fetch_data() -> AtelierResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod http;
mod json;
mod config;
mod storage;
mod ingest;
mod search;
mod error;

pub use http::HttpError;
pub use json::JsonError;
pub use config::ConfigError;
pub use storage::{StorageError, StorageErrorKind};
pub use ingest::{IngestError, IngestErrorKind};
pub use search::{SearchError, SearchErrorKind};
pub use error::{AtelierError, AtelierErrorKind, AtelierResult};
