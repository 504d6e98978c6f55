//! Unisphere REST API interaction module
//!
//! # Module Structure
//!
//! - [`client`] - Session bound to one array; builds resource URIs
//! - [`http`] - Blocking HTTP wrapper (basic auth, JSON, sanitized logging)
//!
//! # Example
//!
//! ```ignore
//! use vmax_xray::unisphere::UnisphereClient;
//!
//! let client = UnisphereClient::new(&array_config)?;
//! client.check_version()?;
//! let response = client.list(ResourceType::StorageGroup, &[])?;
//! ```

pub mod client;
pub mod http;

pub use client::{UnisphereClient, API_VERSION, SUPPORTED_VERSION_PREFIX};
