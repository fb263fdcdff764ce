//! Core data types for the Atelier image pipeline.
//!
//! This crate provides the foundation data types shared across the asset
//! store, the provider adapters, and the service facade.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod descriptor;
mod provider;
mod results;
mod section;
mod status;
mod telemetry;

pub use config::{ProviderConfig, mask_api_key};
pub use descriptor::ImageDescriptor;
pub use provider::{ProviderFilter, ProviderKind};
pub use results::SearchResults;
pub use section::Section;
pub use status::{ApiKeyInfo, ApiKeyReport, HealthState, ProviderStatus, StatusReport};
pub use telemetry::init_telemetry;
