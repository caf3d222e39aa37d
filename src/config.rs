use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::ConfigError;
use crate::serializer::SerializeOptions;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub protocol: ProtocolConfig,
    pub serialize: SerializeConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Version string stamped into outgoing messages.
    pub version: String,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SerializeConfig {
    pub join_runs: bool,
}

impl SerializeConfig {
    pub fn options(&self) -> SerializeOptions {
        SerializeOptions {
            join_runs: self.join_runs,
        }
    }
}

impl Config {
    /// The config bundled into the binary. `build.rs` has already checked
    /// it parses, so falling back to the hard-coded values never happens in
    /// practice.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Parse config from TOML text. Keys that are not set keep their
    /// defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load config from a TOML file, or return defaults if it does not
    /// exist. A file that exists but is broken is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { error, .. }) if error.kind() == io::ErrorKind::NotFound => {
                Ok(Self::compiled_default())
            }
            other => other,
        }
    }
}
