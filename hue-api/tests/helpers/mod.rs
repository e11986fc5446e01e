//! Shared setup for tests against a mock bridge

use hue_api::BridgeClient;
use mockito::{Mock, ServerGuard};
use serde_json::Value;

pub const API_KEY: &str = "testkey";

/// A client pointed at the mock server
pub fn bridge(server: &ServerGuard) -> BridgeClient {
    BridgeClient::new(server.host_with_port(), API_KEY)
}

/// Path of an API resource as the bridge serves it
pub fn api_path(path: &str) -> String {
    format!("/api/{}{}", API_KEY, path)
}

/// Mock answering `method path` with `body`, expected exactly `hits` times
pub fn reply(server: &mut ServerGuard, method: &str, path: &str, body: Value, hits: usize) -> Mock {
    server
        .mock(method, api_path(path).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(hits)
        .create()
}
