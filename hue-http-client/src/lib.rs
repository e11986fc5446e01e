//! Private HTTP client for bridge communication
//!
//! This crate provides a minimal blocking JSON-over-HTTP client for talking to
//! a Hue bridge. It knows nothing about the bridge's URL layout or its error
//! envelope; it sends a method, a URL and an optional JSON body, and hands
//! back the parsed JSON reply.

mod error;

pub use error::HttpError;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

/// HTTP methods the bridge API uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A minimal JSON client for bridge communication
#[derive(Debug, Clone)]
pub struct HttpClient {
    agent: ureq::Agent,
}

impl HttpClient {
    /// Create a new client with a 5 s connect and 10 s read timeout
    pub fn new() -> Self {
        Self::with_timeouts(Duration::from_secs(5), Duration::from_secs(10))
    }

    /// Create a client with custom timeouts
    pub fn with_timeouts(connect: Duration, read: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(connect)
                .timeout_read(read)
                .build(),
        }
    }

    /// Send a request and return the parsed JSON response.
    ///
    /// `body` is JSON-encoded when present; `None` sends no body at all.
    ///
    /// # Errors
    ///
    /// * `HttpError::Status` for any non-2xx status
    /// * `HttpError::Network` for transport failures
    /// * `HttpError::Parse` if the body is not JSON
    pub fn request(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Value, HttpError> {
        trace!(%method, url, "sending request");

        let request = self.agent.request(method.as_str(), url);
        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };

        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                return Err(HttpError::Status {
                    code,
                    body: response.into_string().unwrap_or_default(),
                });
            }
            Err(e) => return Err(HttpError::Network(e.to_string())),
        };

        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(HttpError::Status {
                code: status,
                body: response.into_string().unwrap_or_default(),
            });
        }

        response
            .into_json::<Value>()
            .map_err(|e| HttpError::Parse(e.to_string()))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Method::Get, "GET")]
    #[case(Method::Put, "PUT")]
    #[case(Method::Post, "POST")]
    #[case(Method::Delete, "DELETE")]
    fn test_method_names(#[case] method: Method, #[case] expected: &str) {
        assert_eq!(method.as_str(), expected);
        assert_eq!(method.to_string(), expected);
        assert_eq!(serde_json::to_value(method).unwrap(), json!(expected));
    }

    #[test]
    fn test_request_without_body() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/api/key/lights")
            .match_body("")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"1": {"name": "Desk"}}"#)
            .create();

        let client = HttpClient::new();
        let value = client
            .request(Method::Get, &format!("{}/api/key/lights", server.url()), None)
            .unwrap();

        assert_eq!(value, json!({"1": {"name": "Desk"}}));
        mock.assert();
    }

    #[test]
    fn test_request_sends_json_body() {
        let mut server = Server::new();
        let mock = server
            .mock("PUT", "/api/key/groups/1/action")
            .match_body(Matcher::Json(json!({"on": true})))
            .with_status(200)
            .with_body(r#"[{"success": {"/groups/1/action/on": true}}]"#)
            .create();

        let client = HttpClient::new();
        let value = client
            .request(
                Method::Put,
                &format!("{}/api/key/groups/1/action", server.url()),
                Some(&json!({"on": true})),
            )
            .unwrap();

        assert_eq!(value[0]["success"]["/groups/1/action/on"], json!(true));
        mock.assert();
    }

    #[test]
    fn test_non_success_status() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/api/key/config")
            .with_status(503)
            .with_body("busy")
            .create();

        let client = HttpClient::new();
        let result = client.request(Method::Get, &format!("{}/api/key/config", server.url()), None);

        match result {
            Err(HttpError::Status { code, body }) => {
                assert_eq!(code, 503);
                assert_eq!(body, "busy");
            }
            other => panic!("Expected HttpError::Status, got {:?}", other),
        }
        mock.assert();
    }

    #[test]
    fn test_non_json_body() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/api/key/config")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create();

        let client = HttpClient::new();
        let result = client.request(Method::Get, &format!("{}/api/key/config", server.url()), None);

        assert!(matches!(result, Err(HttpError::Parse(_))));
        mock.assert();
    }

    #[test]
    fn test_connection_refused() {
        let client = HttpClient::with_timeouts(Duration::from_millis(200), Duration::from_millis(200));
        // Port 9 (discard) is not listening on loopback in test environments
        let result = client.request(Method::Get, "http://127.0.0.1:9/api/key/config", None);

        assert!(matches!(result, Err(HttpError::Network(_))));
    }
}
