//! Discovered devices and bridge description parsing.
//!
//! A [`DiscoveredDevice`] is what an SSDP reply tells us. The description
//! document it points at can be fetched to confirm the device is a Hue bridge.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, Result};

/// A device that answered an SSDP search.
///
/// Devices are keyed by `description`: when the same URL is advertised more
/// than once, the later reply wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredDevice {
    /// URL of the device description document (`location` header)
    pub description: String,
    /// Unique service name (`usn` header)
    pub usn: Option<String>,
    /// Search target the reply matched (`st` header)
    pub service_type: Option<String>,
    /// Host component of `description`
    pub ip: String,
    /// `max-age` from the `cache-control` header
    pub cache_seconds: u32,
}

impl DiscoveredDevice {
    /// Fetch and parse the description document this device advertised.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::Description` if the request fails, the server
    /// answers with a non-success status, or the XML cannot be parsed.
    pub fn fetch_description(&self, timeout: Duration) -> Result<BridgeDescription> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DiscoveryError::Description(format!("Failed to create HTTP client: {}", e)))?;

        let response = client
            .get(&self.description)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                DiscoveryError::Description(format!("Failed to fetch {}: {}", self.description, e))
            })?;

        let xml = response
            .text()
            .map_err(|e| DiscoveryError::Description(format!("Failed to read response body: {}", e)))?;

        BridgeDescription::from_xml(&xml)
    }
}

/// UPnP device description root element.
#[derive(Debug, Deserialize)]
struct Root {
    device: BridgeDescription,
}

/// Device description published at a bridge's `description.xml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeDescription {
    pub device_type: String,
    pub friendly_name: String,
    pub manufacturer: String,
    pub model_description: Option<String>,
    pub model_name: String,
    pub model_number: Option<String>,
    pub serial_number: Option<String>,
    #[serde(rename = "UDN")]
    pub udn: String,
}

impl BridgeDescription {
    /// Parse a device description from XML.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::Description` if the XML is malformed or missing required fields.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let root: Root = quick_xml::de::from_str(xml)
            .map_err(|e| DiscoveryError::Description(format!("Failed to parse device XML: {}", e)))?;

        Ok(root.device)
    }

    /// Whether the description identifies a Hue bridge.
    pub fn is_hue_bridge(&self) -> bool {
        let model = self.model_name.to_lowercase();
        let manufacturer = self.manufacturer.to_lowercase();

        (model.contains("hue") && model.contains("bridge"))
            || ((manufacturer.contains("philips") || manufacturer.contains("signify"))
                && self
                    .model_number
                    .as_deref()
                    .is_some_and(|n| n.starts_with("BSB")))
    }
}
