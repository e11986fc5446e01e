use http_client::Method;
use serde_json::Value;

use crate::client::BridgeClient;
use crate::error::Result;
use crate::resource::{write_through, BridgeResource, Resource};
use crate::resources::rule::{RuleAction, RuleCondition};

/// Proxy for a sensor, physical (switches, motion) or virtual (CLIP).
///
/// Attribute writes go to `/sensors/{id}` and are committed locally only
/// when the bridge acknowledges them.
#[derive(Debug, Clone)]
pub struct Sensor {
    client: BridgeClient,
    resource: Resource,
    button_event_path: String,
    last_updated_path: String,
    status_path: String,
}

impl BridgeResource for Sensor {
    const COLLECTION: &'static str = "/sensors";

    fn from_parts(client: BridgeClient, resource: Resource) -> Self {
        let state = format!("{}/{}/state", Self::COLLECTION, resource.id());
        Self {
            button_event_path: format!("{}/buttonevent", state),
            last_updated_path: format!("{}/lastupdated", state),
            status_path: format!("{}/status", state),
            client,
            resource,
        }
    }

    fn resource(&self) -> &Resource {
        &self.resource
    }
}

impl Sensor {
    /// Sensor type, e.g. "ZLLSwitch" or "CLIPGenericStatus"
    pub fn sensor_type(&self) -> Option<&str> {
        self.resource.str_attr("type")
    }

    pub fn button_event_path(&self) -> &str {
        &self.button_event_path
    }

    pub fn last_updated_path(&self) -> &str {
        &self.last_updated_path
    }

    pub fn status_path(&self) -> &str {
        &self.status_path
    }

    /// Path of the sensor's `state` object
    pub fn state_path(&self) -> String {
        format!("{}/state", self.path())
    }

    /// Write one attribute through to the bridge
    pub fn set_attribute(&mut self, key: &str, value: Value) -> Result<()> {
        let path = self.path();
        write_through(&self.client, &mut self.resource, &path, key, value)
    }

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.set_attribute("name", Value::String(name.to_string()))
    }

    /// Rule action addressed at this sensor's state
    pub fn make_action(&self, method: Method, body: Value) -> RuleAction {
        RuleAction::new(self.state_path(), method, body)
    }

    /// Rule condition on one of this sensor's attributes
    ///
    /// An empty `value` is left out, the same as `None`.
    pub fn make_condition(&self, address: &str, operator: &str, value: Option<&str>) -> RuleCondition {
        RuleCondition::new(address, operator, value.filter(|value| !value.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn switch() -> Sensor {
        let client = BridgeClient::new("127.0.0.1:80", "key");
        let resource = Resource::from_value("12", json!({"name": "Hall switch", "type": "ZLLSwitch"})).unwrap();
        Sensor::from_parts(client, resource)
    }

    #[test]
    fn test_derived_paths() {
        let sensor = switch();

        assert_eq!(sensor.button_event_path(), "/sensors/12/state/buttonevent");
        assert_eq!(sensor.last_updated_path(), "/sensors/12/state/lastupdated");
        assert_eq!(sensor.status_path(), "/sensors/12/state/status");
        assert_eq!(sensor.sensor_type(), Some("ZLLSwitch"));
    }

    #[test]
    fn test_make_action_and_condition() {
        let sensor = switch();

        let action = sensor.make_action(Method::Put, json!({"status": 1}));
        assert_eq!(action.address, "/sensors/12/state");

        let condition = sensor.make_condition(sensor.button_event_path(), "eq", Some("1000"));
        assert_eq!(
            serde_json::to_value(condition).unwrap(),
            json!({"address": "/sensors/12/state/buttonevent", "operator": "eq", "value": "1000"})
        );

        let condition = sensor.make_condition(sensor.last_updated_path(), "dx", None);
        assert_eq!(condition.value, None);

        let condition = sensor.make_condition(sensor.last_updated_path(), "dx", Some(""));
        assert_eq!(
            serde_json::to_value(condition).unwrap(),
            json!({"address": "/sensors/12/state/lastupdated", "operator": "dx"})
        );
    }
}
