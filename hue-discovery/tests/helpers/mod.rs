//! Test helpers for fixture-based integration tests

use std::fs;
use std::path::PathBuf;

use hue_discovery::DiscoveredDevice;

/// A captured description document
#[derive(Debug, Clone)]
pub struct DescriptionFixture {
    pub name: String,
    pub xml_content: String,
}

impl DescriptionFixture {
    /// Load a fixture from the fixtures directory
    pub fn load(filename: &str) -> Self {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("tests/fixtures");
        path.push(filename);

        let xml_content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", filename, e));

        Self {
            name: filename.to_string(),
            xml_content,
        }
    }
}

/// A device record pointing at `description_url`, as an SSDP reply would produce
pub fn device_at(description_url: &str, ip: &str) -> DiscoveredDevice {
    DiscoveredDevice {
        description: description_url.to_string(),
        usn: Some("uuid:2f402f80-da50-11e1-9b23-00178810049e::upnp:rootdevice".to_string()),
        service_type: Some("hue".to_string()),
        ip: ip.to_string(),
        cache_seconds: 100,
    }
}
