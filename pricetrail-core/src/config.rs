//! Run configuration.
//!
//! A small TOML file supplies the API host, the key-file path, the output
//! path, and the address list. Every field has a default, so the file is
//! optional and may be partial; command-line flags override file values.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::api::zillow::DEFAULT_HOST;

/// Default key-file path, relative to the working directory.
pub const DEFAULT_KEY_FILE: &str = "rapidapi.key";

/// Default output CSV path, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "zillow_address_price_data.csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Complete run configuration, assembled once at startup.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub api: ApiConfig,
    pub report: OutputConfig,
}

/// `[api]` section: where requests go and how they authenticate.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// RapidAPI host, also sent as the `x-rapidapi-host` header.
    pub host: String,

    /// File holding the API key.
    pub key_file: PathBuf,
}

/// `[report]` section: what to report on and where to write it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination CSV path.
    pub output: PathBuf,

    /// Addresses to report on, in output order.
    pub addresses: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            key_file: DEFAULT_KEY_FILE.into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output: DEFAULT_OUTPUT.into(),
            addresses: Vec::new(),
        }
    }
}

impl ReportConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
