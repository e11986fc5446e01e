//! Hue bridge discovery library
//!
//! This crate finds Hue bridges on a local network using SSDP (Simple Service
//! Discovery Protocol). A multicast M-SEARCH query is sent for the `hue`
//! search target and the HTTP-shaped replies are decoded into
//! [`DiscoveredDevice`] records, deduplicated by description URL.
//!
//! # Quick Start
//!
//! ```no_run
//! use hue_discovery::get;
//!
//! for device in get() {
//!     println!("Found bridge at {} ({})", device.ip, device.description);
//! }
//! ```
//!
//! # Tuned Discovery
//!
//! ```no_run
//! use hue_discovery::{discover, DiscoveryOptions};
//! use std::time::Duration;
//!
//! let options = DiscoveryOptions::default()
//!     .with_timeout(Duration::from_secs(2))
//!     .with_retries(3);
//!
//! let devices = discover(&options)?;
//! for device in &devices {
//!     let description = device.fetch_description(Duration::from_secs(2))?;
//!     if description.is_hue_bridge() {
//!         println!("{} at {}", description.friendly_name, device.ip);
//!     }
//! }
//! # Ok::<(), hue_discovery::DiscoveryError>(())
//! ```

mod error;
mod ssdp;
pub mod device;
mod discovery;

pub use device::{BridgeDescription, DiscoveredDevice};
pub use discovery::{discover, DiscoveryOptions, HUE_SEARCH_TARGET};
pub use error::{DiscoveryError, Result};

use std::time::Duration;

use tracing::warn;

/// Discover Hue bridges with the default options (5-second timeout, one round).
///
/// Network failures are logged and yield an empty list. Use [`discover`] to
/// observe them.
pub fn get() -> Vec<DiscoveredDevice> {
    get_with_timeout(Duration::from_secs(5))
}

/// Discover Hue bridges with a custom per-round timeout.
///
/// # Examples
///
/// ```no_run
/// use hue_discovery::get_with_timeout;
/// use std::time::Duration;
///
/// let devices = get_with_timeout(Duration::from_secs(2));
/// println!("{} bridge(s) answered", devices.len());
/// ```
pub fn get_with_timeout(timeout: Duration) -> Vec<DiscoveredDevice> {
    let options = DiscoveryOptions::default().with_timeout(timeout);
    discover(&options).unwrap_or_else(|e| {
        warn!(error = %e, "discovery failed");
        Vec::new()
    })
}
