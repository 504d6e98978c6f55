//! Configuration Management
//!
//! The configuration file lists the arrays to inventory and how to reach the
//! Unisphere server that manages each of them.
//!
//! ```yaml
//! arrays:
//!   - sid: "000197800123"
//!     address: unisphere.example.com
//!     user: smc
//!     password: smc
//!     port: 8443
//!     verify_tls: false
//! ```

use crate::error::{InventoryError, Result};
use crate::unisphere::client::{base_url_for, DEFAULT_PORT};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Length of a Symmetrix serial number
pub const SID_LENGTH: usize = 12;

/// Whole configuration file
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub arrays: Vec<ArrayConfig>,
}

/// One array to inventory
#[derive(Clone, Deserialize)]
pub struct ArrayConfig {
    /// Serial number, 12 digits (quote it in YAML to keep leading zeros)
    pub sid: String,
    /// Unisphere host name or address
    pub address: String,
    pub user: String,
    pub password: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Check the Unisphere TLS certificate
    #[serde(default)]
    pub verify_tls: bool,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl fmt::Debug for ArrayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayConfig")
            .field("sid", &self.sid)
            .field("address", &self.address)
            .field("user", &self.user)
            .field("password", &"********")
            .field("port", &self.port)
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

impl Config {
    /// Load and validate the configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::error!("Unknown file {}", path.display());
            return Err(InventoryError::Configuration(format!(
                "{} is not a file",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            tracing::error!("Insufficient rights on {}", path.display());
            InventoryError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;

        content.parse()
    }

    /// Check every array entry
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for array in &self.arrays {
            if !is_valid_sid(&array.sid) {
                return Err(invalid(format!("{} is not a valid SID number", array.sid)));
            }
            if !seen.insert(array.sid.as_str()) {
                return Err(invalid(format!("{} is listed more than once", array.sid)));
            }

            for (name, value) in [
                ("address", &array.address),
                ("user", &array.user),
                ("password", &array.password),
            ] {
                if value.trim().is_empty() {
                    return Err(invalid(format!(
                        "{} item cannot be empty (array {})",
                        name, array.sid
                    )));
                }
            }

            if url::Url::parse(&base_url_for(&array.address, array.port)).is_err() {
                return Err(invalid(format!(
                    "{} is not a valid address (array {})",
                    array.address, array.sid
                )));
            }
        }

        Ok(())
    }
}

impl std::str::FromStr for Config {
    type Err = InventoryError;

    fn from_str(content: &str) -> Result<Self> {
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| {
                invalid(format!("incorrect config file, please check syntax: {}", e))
            })?
        };

        config.validate()?;
        Ok(config)
    }
}

fn invalid(message: String) -> InventoryError {
    tracing::error!("{}", message);
    InventoryError::Configuration(message)
}

/// Twelve ASCII digits
pub fn is_valid_sid(sid: &str) -> bool {
    sid.len() == SID_LENGTH && sid.chars().all(|c| c.is_ascii_digit())
}
