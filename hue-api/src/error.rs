use http_client::HttpError;
use serde_json::Value;
use thiserror::Error;

/// High-level API errors for bridge operations
///
/// The bridge answers semantic failures (unknown resource, invalid
/// attribute, missing link-button press) with a 2xx status and an error
/// envelope, so those arrive as [`ApiError::Bridge`] rather than as
/// transport failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure or non-2xx HTTP status
    #[error("Transport error: {0}")]
    Transport(String),

    /// Error element reported by the bridge
    ///
    /// Carries the raw `{"error": {...}}` element, first in the reply.
    #[error("Bridge error: {0}")]
    Bridge(Value),

    /// The bridge answered with JSON of an unexpected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Invalid argument supplied by the caller
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A resource a helper depends on does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ApiError {
    /// `type` code of a bridge error, if this is one
    pub fn bridge_error_type(&self) -> Option<u64> {
        match self {
            ApiError::Bridge(payload) => payload.get("error")?.get("type")?.as_u64(),
            _ => None,
        }
    }

    /// `description` text of a bridge error, if this is one
    pub fn bridge_error_description(&self) -> Option<&str> {
        match self {
            ApiError::Bridge(payload) => payload.get("error")?.get("description")?.as_str(),
            _ => None,
        }
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Status { .. } | HttpError::Network(_) => ApiError::Transport(error.to_string()),
            HttpError::Parse(msg) => ApiError::UnexpectedResponse(msg),
        }
    }
}
