//! Client for the Hue bridge REST API
//!
//! [`BridgeClient`] wraps the bridge's `http://{address}/api/{key}/...` surface.
//! Collection accessors fetch JSON and wrap each entry in a typed proxy
//! ([`Group`], [`Scene`], [`Sensor`], [`Rule`], [`Light`]). Reading a proxy's
//! attributes is a local lookup in the snapshot taken at fetch time; writing
//! through one of its setters is an immediate `PUT` to the bridge.
//!
//! ```rust,no_run
//! use hue_api::{BridgeClient, BridgeResource, RuleFilter};
//! use serde_json::json;
//!
//! let bridge = BridgeClient::new("192.168.1.2", "my-api-key");
//!
//! let mut lounge = bridge
//!     .groups(Some("Lounge"))?
//!     .into_iter()
//!     .next()
//!     .expect("no Lounge group");
//! lounge.set_on(true)?;
//!
//! let relax = bridge.ensure_scene("Relax", &lounge, &json!({"on": true, "bri": 144}))?;
//! println!("scene {} covers {:?}", relax.id(), relax.light_ids());
//!
//! if let Some(switch) = bridge.find_switch_for_group(&lounge)? {
//!     bridge.reset_switch_rules(&switch, &lounge)?;
//! }
//!
//! let rules = bridge.rules(&RuleFilter::any().with_name("Lounge switch on0"))?;
//! # let _ = rules;
//! # Ok::<(), hue_api::ApiError>(())
//! ```
//!
//! The bridge answers most semantic failures with HTTP 200 and an error
//! envelope; every accessor surfaces those as [`ApiError::Bridge`].

pub mod client;
pub mod error;
pub mod provisioning;
pub mod resource;
pub mod resources;

pub use client::BridgeClient;
pub use error::{ApiError, Result};
pub use http_client::Method;
pub use resource::{BridgeResource, Resource};
pub use resources::{Group, Light, Rule, RuleAction, RuleCondition, RuleFilter, Scene, Sensor};
