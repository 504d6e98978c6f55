//! Resource abstraction layer
//!
//! Every inventory object on the array (volume, initiator, group, view, pool)
//! is fetched the same way: list the identifying keys, then describe each key.
//!
//! # Architecture
//!
//! - [`registry`] - Static table of resource types, endpoints and key paths
//! - [`session`] - The two calls an array session must answer
//! - [`paged`] - Lazy list/describe iterator over one resource type
//!
//! # Example
//!
//! ```ignore
//! use vmax_xray::resource::{paged_resources, ResourceType};
//!
//! fn dump(session: &impl ArraySession) -> vmax_xray::error::Result<()> {
//!     for record in paged_resources(session, ResourceType::StorageGroup)? {
//!         println!("{:?}", record?);
//!     }
//!     Ok(())
//! }
//! ```

mod paged;
mod registry;
mod session;

pub(crate) use paged::into_record;
pub use paged::{paged_resources, PagedResources};
pub use registry::{Category, ResourceDef, ResourceType};
pub use session::{ApiResponse, ArraySession, STATUS_OK};

/// One fully described inventory object
pub type Record = serde_json::Map<String, serde_json::Value>;
