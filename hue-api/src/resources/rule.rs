//! Automation rules and their building blocks

use http_client::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::BridgeClient;
use crate::error::Result;
use crate::resource::{write_through, BridgeResource, Resource};

/// Operator that fires when the addressed attribute changes
pub const OPERATOR_CHANGED: &str = "dx";

/// One condition of a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCondition {
    pub address: String,
    pub operator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl RuleCondition {
    pub fn new(address: impl Into<String>, operator: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            address: address.into(),
            operator: operator.into(),
            value: value.map(str::to_string),
        }
    }

    /// `dx` condition on `address`
    pub fn changed(address: impl Into<String>) -> Self {
        Self::new(address, OPERATOR_CHANGED, None)
    }
}

/// One action of a rule: a request the bridge issues against itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleAction {
    pub address: String,
    pub method: Method,
    pub body: Value,
}

impl RuleAction {
    pub fn new(address: impl Into<String>, method: Method, body: Value) -> Self {
        Self {
            address: address.into(),
            method,
            body,
        }
    }
}

/// Selects rules by name, action, and condition.
///
/// A rule passes when every supplied criterion matches; omitted criteria
/// always match. Actions and conditions compare by JSON structure against
/// the rule's lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleFilter {
    pub name: Option<String>,
    pub action: Option<RuleAction>,
    pub condition: Option<RuleCondition>,
}

impl RuleFilter {
    /// A filter that matches every rule
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_action(mut self, action: RuleAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_condition(mut self, condition: RuleCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn matches(&self, rule: &Resource) -> bool {
        let name_ok = self
            .name
            .as_deref()
            .map_or(true, |name| rule.name() == Some(name));

        let action_ok = self
            .action
            .as_ref()
            .map_or(true, |action| list_contains(rule, "actions", action));

        let condition_ok = self
            .condition
            .as_ref()
            .map_or(true, |condition| list_contains(rule, "conditions", condition));

        name_ok && action_ok && condition_ok
    }
}

fn list_contains<T: Serialize>(rule: &Resource, key: &str, needle: &T) -> bool {
    let Ok(needle) = serde_json::to_value(needle) else {
        return false;
    };

    rule.get(key)
        .and_then(Value::as_array)
        .is_some_and(|items| items.contains(&needle))
}

/// Proxy for a bridge rule.
///
/// Attribute writes go to `/rules/{id}` and are committed locally only when
/// the bridge acknowledges them.
#[derive(Debug, Clone)]
pub struct Rule {
    client: BridgeClient,
    resource: Resource,
}

impl BridgeResource for Rule {
    const COLLECTION: &'static str = "/rules";

    fn from_parts(client: BridgeClient, resource: Resource) -> Self {
        Self { client, resource }
    }

    fn resource(&self) -> &Resource {
        &self.resource
    }
}

impl Rule {
    /// Conditions that decode; entries of an unknown shape are skipped
    pub fn conditions(&self) -> Vec<RuleCondition> {
        decode_list(&self.resource, "conditions")
    }

    /// Actions that decode; entries of an unknown shape are skipped
    pub fn actions(&self) -> Vec<RuleAction> {
        decode_list(&self.resource, "actions")
    }

    /// `address` of every condition, whatever the shape of the rest of it
    pub fn condition_addresses(&self) -> Vec<&str> {
        addresses(&self.resource, "conditions")
    }

    /// `address` of every action, whatever the shape of the rest of it
    pub fn action_addresses(&self) -> Vec<&str> {
        addresses(&self.resource, "actions")
    }

    pub fn status(&self) -> Option<&str> {
        self.resource.str_attr("status")
    }

    /// Write one attribute through to the bridge
    pub fn set_attribute(&mut self, key: &str, value: Value) -> Result<()> {
        let path = self.path();
        write_through(&self.client, &mut self.resource, &path, key, value)
    }

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.set_attribute("name", Value::String(name.to_string()))
    }

    /// Enable or disable the rule
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        let status = if enabled { "enabled" } else { "disabled" };
        self.set_attribute("status", Value::String(status.to_string()))
    }

    pub fn delete(&self) -> Result<Value> {
        self.client.delete(&self.path())
    }
}

fn addresses<'a>(resource: &'a Resource, key: &str) -> Vec<&'a str> {
    resource
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("address")?.as_str())
                .collect()
        })
        .unwrap_or_default()
}

fn decode_list<T: DeserializeOwned>(resource: &Resource, key: &str) -> Vec<T> {
    resource
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}
