//! # Hue SDK
//!
//! Ties the workspace together: load bridge settings, find the bridge when
//! no address is configured, and hand back a ready [`BridgeClient`].
//!
//! ```rust,no_run
//! use hue_sdk::{connect, logging, BridgeConfig, BridgeResource};
//!
//! logging::init_logging_from_env()?;
//!
//! let config = BridgeConfig::from_env().or_else(|_| BridgeConfig::load_default())?;
//! let bridge = connect(&config)?;
//!
//! for group in bridge.groups(None)? {
//!     println!("{:?}", group.to_json());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crates
//!
//! ```text
//! hue-sdk (config, logging, connect)
//!     ↓
//! hue-api (BridgeClient, resource proxies, provisioning)
//!     ↓                         hue-discovery (SSDP search)
//! hue-http-client (blocking JSON over HTTP)
//! ```

pub mod config;
mod connect;
mod error;
pub mod logging;

pub use config::BridgeConfig;
pub use connect::{connect, connect_with_options, from_discovered_devices};
pub use error::{Result, SdkError};

pub use hue_api::{
    ApiError, BridgeClient, BridgeResource, Group, Light, Method, Rule, RuleAction, RuleCondition,
    RuleFilter, Scene, Sensor,
};
pub use hue_discovery::{DiscoveredDevice, DiscoveryError, DiscoveryOptions};
