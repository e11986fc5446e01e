//! Local projections of bridge resources
//!
//! Every proxy type wraps a [`Resource`]: the id the bridge keyed it by plus
//! every attribute the bridge returned. Values are a snapshot taken at fetch
//! time and are never refreshed behind the caller's back.

use serde_json::{Map, Value};

use crate::client::BridgeClient;
use crate::error::{ApiError, Result};

/// Id and attributes of one remote JSON object
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    id: String,
    attributes: Map<String, Value>,
}

impl Resource {
    pub fn new(id: impl Into<String>, attributes: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    /// Build from a JSON value, which must be an object
    pub fn from_value(id: impl Into<String>, value: Value) -> Result<Self> {
        let id = id.into();
        match value {
            Value::Object(attributes) => Ok(Self { id, attributes }),
            other => Err(ApiError::UnexpectedResponse(format!(
                "resource {} is not a JSON object: {}",
                id, other
            ))),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// String attribute, `None` if absent or not a string
    pub fn str_attr(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.str_attr("name")
    }

    /// String entries of an array attribute such as `lights`
    pub fn string_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The attributes with the id folded in
    pub fn to_json(&self) -> Value {
        let mut object = self.attributes.clone();
        object.insert("id".to_string(), Value::String(self.id.clone()));
        Value::Object(object)
    }

    pub(crate) fn set(&mut self, key: &str, value: Value) {
        self.attributes.insert(key.to_string(), value);
    }
}

/// A typed proxy over one bridge resource.
///
/// Implementors are built from a client handle and a fetched [`Resource`];
/// the client is how write-through setters reach the bridge.
pub trait BridgeResource: Sized {
    /// Collection path the resource lives under, e.g. `/groups`
    const COLLECTION: &'static str;

    fn from_parts(client: BridgeClient, resource: Resource) -> Self;

    fn resource(&self) -> &Resource;

    fn id(&self) -> &str {
        self.resource().id()
    }

    fn name(&self) -> Option<&str> {
        self.resource().name()
    }

    /// Path of this resource, e.g. `/groups/1`
    fn path(&self) -> String {
        format!("{}/{}", Self::COLLECTION, self.id())
    }

    fn to_json(&self) -> Value {
        self.resource().to_json()
    }
}

/// Whether a write reply carries a `success` entry
pub(crate) fn write_succeeded(reply: &Value) -> bool {
    reply
        .as_array()
        .is_some_and(|items| items.iter().any(|item| item.get("success").is_some()))
}

/// PUT `{key: value}` to `path` and commit it locally only if the bridge
/// reports success
pub(crate) fn write_through(
    client: &BridgeClient,
    resource: &mut Resource,
    path: &str,
    key: &str,
    value: Value,
) -> Result<()> {
    let mut body = Map::new();
    body.insert(key.to_string(), value.clone());

    let reply = client.put(path, &Value::Object(body))?;
    if !write_succeeded(&reply) {
        return Err(ApiError::UnexpectedResponse(format!(
            "write of {} to {} was not acknowledged: {}",
            key, path, reply
        )));
    }

    resource.set(key, value);
    Ok(())
}
