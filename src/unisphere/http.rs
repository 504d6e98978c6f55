//! HTTP utilities for Unisphere REST API calls

use crate::resource::ApiResponse;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// Blocking HTTP client with basic auth, shared by every call to one Unisphere
#[derive(Clone)]
pub struct UnisphereHttpClient {
    client: Client,
    username: String,
    password: String,
}

impl UnisphereHttpClient {
    /// Create a new HTTP client
    pub fn new(username: &str, password: &str, verify_tls: bool) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(concat!("vmax-xray/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(!verify_tls)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Make a GET request and hand back the body with its status.
    ///
    /// Non-success statuses are not errors here; only transport failures are.
    /// A body that is empty or not JSON comes back as `None`.
    pub fn get(&self, url: &Url, params: &[(&str, &str)]) -> Result<ApiResponse> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .basic_auth(&self.username, Some(&self.password))
            .query(params)
            .send()
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        let body = response
            .text()
            .context("Failed to read response body")?;

        tracing::debug!(
            "GET request to {} has returned with a status code of: {}",
            url,
            status.as_u16()
        );

        if !status.is_success() {
            tracing::warn!("API error: {} - {}", status, sanitize_for_log(&body));
        }

        let parsed = if body.trim().is_empty() {
            None
        } else {
            match serde_json::from_str(&body) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::info!(
                        "No JSON received from API. Status code received is: {}",
                        status.as_u16()
                    );
                    None
                }
            }
        };

        Ok(ApiResponse::new(parsed, status.as_u16()))
    }
}
