//! Array session contract
//!
//! The collection engine only needs two calls per resource type. Anything that
//! can answer them (the Unisphere client, a test double) can drive a run.

use super::ResourceType;
use crate::error::Result;
use serde_json::Value;

/// The only status the engine treats as success
pub const STATUS_OK: u16 = 200;

/// Raw answer of one REST call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Parsed JSON body, `None` when the server sent nothing usable
    pub body: Option<Value>,
    pub status: u16,
}

impl ApiResponse {
    pub fn new(body: Option<Value>, status: u16) -> Self {
        Self { body, status }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(Some(body), STATUS_OK)
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// A live connection to one array
pub trait ArraySession {
    /// Serial number of the array this session talks to
    fn sid(&self) -> &str;

    /// Enumerate the identifying keys of one resource type
    fn list(&self, resource: ResourceType, filters: &[(&str, &str)]) -> Result<ApiResponse>;

    /// Fetch the full record of one object
    fn describe(&self, resource: ResourceType, key: &str) -> Result<ApiResponse>;
}

impl<S: ArraySession + ?Sized> ArraySession for &S {
    fn sid(&self) -> &str {
        (**self).sid()
    }

    fn list(&self, resource: ResourceType, filters: &[(&str, &str)]) -> Result<ApiResponse> {
        (**self).list(resource, filters)
    }

    fn describe(&self, resource: ResourceType, key: &str) -> Result<ApiResponse> {
        (**self).describe(resource, key)
    }
}
