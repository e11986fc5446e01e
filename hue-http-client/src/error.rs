//! Error types for the HTTP client

use thiserror::Error;

/// Errors that can occur during HTTP communication
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server answered with a non-2xx status
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },

    /// Connection, DNS, or I/O failure
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not JSON
    #[error("JSON parsing error: {0}")]
    Parse(String),
}
