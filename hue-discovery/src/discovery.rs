//! Search rounds and reply collection.
//!
//! Discovery runs `retries` independent rounds. Each round sends one M-SEARCH
//! query on a fresh socket and collects replies until the round's timeout
//! elapses. Replies are decoded and deduplicated by description URL.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::device::DiscoveredDevice;
use crate::error::Result;
use crate::ssdp::{parse_advertisement, SearchRequest, SearchRound, SsdpClient};

/// Search target a Hue bridge answers to
pub const HUE_SEARCH_TARGET: &str = "hue";

/// Parameters of a discovery run.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryOptions {
    /// How long each round listens for replies
    pub timeout: Duration,
    /// Number of search rounds
    pub retries: u32,
    /// `MX` delay hint sent to devices, in seconds
    pub mx: u32,
    /// `ST` header of the query
    pub search_target: String,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            retries: 1,
            mx: 3,
            search_target: HUE_SEARCH_TARGET.to_string(),
        }
    }
}

impl DiscoveryOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_mx(mut self, mx: u32) -> Self {
        self.mx = mx;
        self
    }
}

/// Run discovery on the local network.
///
/// Malformed replies are skipped and the round continues.
///
/// # Errors
///
/// Returns `DiscoveryError::Network` if a socket cannot be opened, configured,
/// or used. A receive timeout just ends the round.
pub fn discover(options: &DiscoveryOptions) -> Result<Vec<DiscoveredDevice>> {
    collect_rounds(&mut SsdpClient, options)
}

pub(crate) fn collect_rounds<R: SearchRound>(
    rounds: &mut R,
    options: &DiscoveryOptions,
) -> Result<Vec<DiscoveredDevice>> {
    let request = SearchRequest {
        search_target: &options.search_target,
        mx: options.mx,
    };

    let mut devices = DeviceSet::default();
    for round in 0..options.retries {
        debug!(round, st = %options.search_target, "sending M-SEARCH");
        let replies = rounds.run(&request, options.timeout)?;

        for raw in replies {
            match parse_advertisement(&raw) {
                Ok(device) => devices.insert(device),
                Err(e) => debug!(error = %e, "skipping SSDP reply"),
            }
        }
    }

    Ok(devices.into_vec())
}

/// Devices keyed by description URL, in first-seen order
#[derive(Debug, Default)]
struct DeviceSet {
    devices: Vec<DiscoveredDevice>,
    index: HashMap<String, usize>,
}

impl DeviceSet {
    fn insert(&mut self, device: DiscoveredDevice) {
        match self.index.get(&device.description) {
            Some(&slot) => self.devices[slot] = device,
            None => {
                self.index.insert(device.description.clone(), self.devices.len());
                self.devices.push(device);
            }
        }
    }

    fn into_vec(self) -> Vec<DiscoveredDevice> {
        self.devices
    }
}
