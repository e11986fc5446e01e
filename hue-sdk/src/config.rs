//! Where to find the bridge and which key to use

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SdkError};

pub const ADDRESS_ENV: &str = "HUE_BRIDGE_ADDRESS";
pub const API_KEY_ENV: &str = "HUE_API_KEY";

/// Connection settings for one bridge
///
/// Without an `address` the bridge is located by discovery on connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub api_key: String,
}

impl BridgeConfig {
    pub fn new(address: Option<String>, api_key: impl Into<String>) -> Self {
        Self {
            address,
            api_key: api_key.into(),
        }
    }

    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| SdkError::Config(format!("cannot read {}: {}", path.display(), e)))?;

        let config: Self = serde_json::from_str(&content)
            .map_err(|e| SdkError::Config(format!("invalid {}: {}", path.display(), e)))?;

        if config.api_key.is_empty() {
            return Err(SdkError::Config(format!("{}: api_key is empty", path.display())));
        }
        Ok(config)
    }

    /// Read `HUE_BRIDGE_ADDRESS` and `HUE_API_KEY`; the key is required
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load `<config dir>/hue-sdk/bridge.json`
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path()
            .ok_or_else(|| SdkError::Config("no configuration directory on this platform".to_string()))?;
        Self::load(path)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hue-sdk").join("bridge.json"))
    }

    /// Write the config as pretty JSON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SdkError::Config(format!("cannot create {}: {}", parent.display(), e)))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SdkError::Config(e.to_string()))?;
        fs::write(path, json)
            .map_err(|e| SdkError::Config(format!("cannot write {}: {}", path.display(), e)))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_ENV)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| SdkError::Config(format!("{} is not set", API_KEY_ENV)))?;
        let address = lookup(ADDRESS_ENV).filter(|address| !address.is_empty());

        Ok(Self { address, api_key })
    }
}
