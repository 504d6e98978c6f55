//! Unisphere Client
//!
//! Main client for one array, combining the HTTP wrapper with URI building
//! for the REST resources the inventory reads.

use super::http::UnisphereHttpClient;
use crate::config::ArrayConfig;
use crate::error::{InventoryError, Result};
use crate::resource::{ApiResponse, ArraySession, Category, ResourceDef, ResourceType};
use url::Url;

/// REST API version segment used in every URI
pub const API_VERSION: &str = "84";

/// Unisphere release the URIs above are written for
pub const SUPPORTED_VERSION_PREFIX: &str = "V8.4";

pub const DEFAULT_PORT: u16 = 8443;

/// Base URL of the REST API on a Unisphere server
pub fn base_url_for(address: &str, port: u16) -> String {
    format!("https://{}:{}/univmax/restapi", address, port)
}

/// Unisphere REST session bound to one array
#[derive(Clone)]
pub struct UnisphereClient {
    http: UnisphereHttpClient,
    base_url: String,
    sid: String,
}

impl UnisphereClient {
    /// Create a client for a configured array
    pub fn new(array: &ArrayConfig) -> Result<Self> {
        Self::with_base_url(
            &base_url_for(&array.address, array.port),
            &array.sid,
            &array.user,
            &array.password,
            array.verify_tls,
        )
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(
        base_url: &str,
        sid: &str,
        user: &str,
        password: &str,
        verify_tls: bool,
    ) -> Result<Self> {
        Url::parse(base_url).map_err(|e| {
            InventoryError::Configuration(format!("invalid Unisphere URL {}: {}", base_url, e))
        })?;

        let http = UnisphereHttpClient::new(user, password, verify_tls)
            .map_err(|e| InventoryError::Configuration(format!("{:#}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            sid: sid.to_string(),
        })
    }

    /// URI of a resource collection, or of one named object in it
    pub fn resource_uri(&self, def: &ResourceDef, name: Option<&str>) -> String {
        let mut uri = match def.category {
            Category::SloProvisioning => format!(
                "/{}/sloprovisioning/symmetrix/{}/{}",
                API_VERSION, self.sid, def.endpoint
            ),
            Category::System => format!("/{}/system/{}", API_VERSION, def.endpoint),
        };

        if let Some(name) = name {
            uri.push('/');
            uri.push_str(&urlencoding::encode(name));
        }
        uri
    }

    fn url(&self, uri: &str) -> std::result::Result<Url, url::ParseError> {
        Url::parse(&format!("{}{}", self.base_url, uri))
    }

    fn get(
        &self,
        resource: ResourceType,
        uri: &str,
        params: &[(&str, &str)],
    ) -> Result<ApiResponse> {
        let url = self.url(uri).map_err(|e| {
            InventoryError::collection(resource, format!("invalid URI {}: {}", uri, e))
        })?;

        self.http.get(&url, params).map_err(|e| {
            tracing::error!("The GET request to URL {} failed: {:#}", url, e);
            InventoryError::collection(resource, format!("{:#}", e))
        })
    }

    /// Version string reported by the Unisphere server, e.g. `V8.4.0.7`
    pub fn uni_version(&self) -> Result<String> {
        let uri = format!("/{}/system/version", API_VERSION);
        let response = self.get(ResourceType::Array, &uri, &[])?;

        if !response.is_success() {
            return Err(InventoryError::collection(
                ResourceType::Array,
                format!("version request returned status {}", response.status),
            ));
        }

        Ok(response
            .body
            .as_ref()
            .and_then(|body| body.get("version"))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string())
    }

    /// Refuse to run against a Unisphere release the URIs don't match
    pub fn check_version(&self) -> Result<()> {
        let version = self.uni_version()?;
        tracing::debug!("Unisphere version {}", version);

        if !version.starts_with(SUPPORTED_VERSION_PREFIX) {
            tracing::error!(
                "UNISPHERE {} is the only supported version (found {:?})",
                SUPPORTED_VERSION_PREFIX,
                version
            );
            return Err(InventoryError::UnsupportedVersion {
                found: version,
                expected: SUPPORTED_VERSION_PREFIX,
            });
        }
        Ok(())
    }
}

impl ArraySession for UnisphereClient {
    fn sid(&self) -> &str {
        &self.sid
    }

    fn list(&self, resource: ResourceType, filters: &[(&str, &str)]) -> Result<ApiResponse> {
        let uri = self.resource_uri(resource.def(), None);
        self.get(resource, &uri, filters)
    }

    fn describe(&self, resource: ResourceType, key: &str) -> Result<ApiResponse> {
        let uri = self.resource_uri(resource.def(), Some(key));
        self.get(resource, &uri, &[])
    }
}
