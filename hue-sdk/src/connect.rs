use hue_api::BridgeClient;
use hue_discovery::{DiscoveredDevice, DiscoveryOptions};
use tracing::{debug, info};

use crate::config::BridgeConfig;
use crate::error::{Result, SdkError};

/// Build a client for the configured bridge.
///
/// When the config has no address, one discovery run with default options
/// locates the bridge and the first device found is used.
pub fn connect(config: &BridgeConfig) -> Result<BridgeClient> {
    connect_with_options(config, &DiscoveryOptions::default())
}

/// [`connect`] with explicit discovery options
pub fn connect_with_options(config: &BridgeConfig, options: &DiscoveryOptions) -> Result<BridgeClient> {
    if let Some(address) = &config.address {
        debug!(address = %address, "using configured bridge address");
        return Ok(BridgeClient::new(address.clone(), config.api_key.clone()));
    }

    let devices = hue_discovery::discover(options)?;
    from_discovered_devices(devices, &config.api_key)
}

/// Build a client for the first of `devices`
///
/// Use this when you already hold the result of a discovery run.
pub fn from_discovered_devices(devices: Vec<DiscoveredDevice>, api_key: &str) -> Result<BridgeClient> {
    let device = devices.into_iter().next().ok_or(SdkError::BridgeNotFound)?;

    info!(ip = %device.ip, description = %device.description, "connecting to discovered bridge");
    Ok(BridgeClient::new(device.ip, api_key))
}
