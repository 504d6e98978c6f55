//! Vmax-XRay: inventory of a VMAX array through the Unisphere REST API.
//!
//! For each configured array the factory picks a collector from the model
//! code in the SID, the collector walks every resource type of that model and
//! the report writes one sheet per resource type into an Excel workbook.

pub mod config;
pub mod error;
pub mod inventory;
pub mod report;
pub mod resource;
pub mod unisphere;

pub use error::{InventoryError, Result};
