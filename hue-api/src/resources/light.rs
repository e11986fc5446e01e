use serde_json::Value;

use crate::client::BridgeClient;
use crate::error::Result;
use crate::resource::{BridgeResource, Resource};

/// Proxy for a light. A plain snapshot: it has no write-through setters.
#[derive(Debug, Clone)]
pub struct Light {
    client: BridgeClient,
    resource: Resource,
}

impl BridgeResource for Light {
    const COLLECTION: &'static str = "/lights";

    fn from_parts(client: BridgeClient, resource: Resource) -> Self {
        Self { client, resource }
    }

    fn resource(&self) -> &Resource {
        &self.resource
    }
}

impl Light {
    /// Light type, e.g. "Extended color light"
    pub fn light_type(&self) -> Option<&str> {
        self.resource.str_attr("type")
    }

    pub fn model_id(&self) -> Option<&str> {
        self.resource.str_attr("modelid")
    }

    /// The `state` object as last fetched
    pub fn state(&self) -> Option<&Value> {
        self.resource.get("state")
    }

    pub fn is_on(&self) -> Option<bool> {
        self.state()?.get("on")?.as_bool()
    }

    pub fn is_reachable(&self) -> Option<bool> {
        self.state()?.get("reachable")?.as_bool()
    }

    /// Fetch a fresh snapshot of this light
    pub fn refresh(&self) -> Result<Self> {
        let value = self.client.get(&self.path())?;
        let resource = Resource::from_value(self.id(), value)?;
        Ok(Self::from_parts(self.client.clone(), resource))
    }
}
