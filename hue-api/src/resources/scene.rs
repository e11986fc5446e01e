use serde_json::Value;

use crate::client::BridgeClient;
use crate::error::Result;
use crate::resource::{BridgeResource, Resource};

/// Proxy for a scene.
///
/// Scenes carry no write-through setters; their per-light state is managed
/// with [`Scene::lightstate`].
#[derive(Debug, Clone)]
pub struct Scene {
    client: BridgeClient,
    resource: Resource,
}

impl BridgeResource for Scene {
    const COLLECTION: &'static str = "/scenes";

    fn from_parts(client: BridgeClient, resource: Resource) -> Self {
        Self { client, resource }
    }

    fn resource(&self) -> &Resource {
        &self.resource
    }
}

impl Scene {
    /// Ids of the lights the scene covers
    pub fn light_ids(&self) -> Vec<String> {
        self.resource.string_list("lights")
    }

    /// Fetch the full scene, including stored light states
    pub fn get(&self) -> Result<Value> {
        self.client.get(&self.path())
    }

    pub fn delete(&self) -> Result<Value> {
        self.client.delete(&self.path())
    }

    /// Store `params` as the state of `light_id` within this scene
    pub fn lightstate(&self, light_id: &str, params: &Value) -> Result<Value> {
        self.client
            .put(&format!("{}/lightstates/{}", self.path(), light_id), params)
    }
}
