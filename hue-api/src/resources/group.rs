use http_client::Method;
use serde_json::Value;

use crate::client::BridgeClient;
use crate::error::Result;
use crate::resource::{write_through, BridgeResource, Resource};
use crate::resources::rule::RuleAction;

/// Proxy for a light group.
///
/// Setters write to the group's action path (`/groups/{id}/action`) before
/// touching the local snapshot, and commit locally only when the bridge
/// acknowledges the write.
#[derive(Debug, Clone)]
pub struct Group {
    client: BridgeClient,
    resource: Resource,
    action_path: String,
}

impl BridgeResource for Group {
    const COLLECTION: &'static str = "/groups";

    fn from_parts(client: BridgeClient, resource: Resource) -> Self {
        let action_path = format!("{}/{}/action", Self::COLLECTION, resource.id());
        Self {
            client,
            resource,
            action_path,
        }
    }

    fn resource(&self) -> &Resource {
        &self.resource
    }
}

impl Group {
    pub fn action_path(&self) -> &str {
        &self.action_path
    }

    /// Ids of the lights in this group
    pub fn light_ids(&self) -> Vec<String> {
        self.resource.string_list("lights")
    }

    /// Group type, e.g. "Room" or "LightGroup"
    pub fn group_type(&self) -> Option<&str> {
        self.resource.str_attr("type")
    }

    /// Write one action attribute through to the bridge
    pub fn set_attribute(&mut self, key: &str, value: Value) -> Result<()> {
        write_through(&self.client, &mut self.resource, &self.action_path, key, value)
    }

    pub fn set_on(&mut self, on: bool) -> Result<()> {
        self.set_attribute("on", Value::Bool(on))
    }

    pub fn set_brightness(&mut self, bri: u8) -> Result<()> {
        self.set_attribute("bri", Value::from(bri))
    }

    /// Recall a scene on this group
    pub fn set_scene(&mut self, scene_id: &str) -> Result<()> {
        self.set_attribute("scene", Value::String(scene_id.to_string()))
    }

    /// Rule action addressed at this group's action path
    pub fn make_action(&self, method: Method, body: Value) -> RuleAction {
        RuleAction::new(self.action_path.clone(), method, body)
    }
}
