//! Error kinds
//!
//! Every failure the inventory can hit maps to one of these variants. They are
//! raised where they are detected, never retried, and carried up to the driver
//! which turns them into a process exit code.

use crate::resource::ResourceType;

/// Result alias used across the crate
pub type Result<T, E = InventoryError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum InventoryError {
    /// Malformed or unreadable configuration file
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Output directory missing, not writable, or the workbook could not be written
    #[error("report error: {0}")]
    Formatter(String),

    /// The SID does not carry a known hardware generation code
    #[error("the SID {sid} doesn't match with any VMAX array model (code {code:?})")]
    Factory { sid: String, code: String },

    /// A list or describe call failed while collecting a resource type
    #[error("error while collecting {resource}: {message}")]
    Collection {
        resource: ResourceType,
        message: String,
    },

    /// Unisphere answered with a REST API version this tool does not speak
    #[error("unsupported Unisphere version {found:?}, expected {expected}*")]
    UnsupportedVersion { found: String, expected: &'static str },
}

impl InventoryError {
    pub fn collection(resource: ResourceType, message: impl Into<String>) -> Self {
        Self::Collection {
            resource,
            message: message.into(),
        }
    }

    /// Process exit status for this error kind
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 1,
            Self::Formatter(_) => 2,
            Self::Factory { .. } => 3,
            Self::Collection { .. } => 4,
            Self::UnsupportedVersion { .. } => 1,
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for InventoryError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Formatter(err.to_string())
    }
}
