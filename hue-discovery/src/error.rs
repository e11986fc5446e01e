//! Error types for the discovery system.

use thiserror::Error;

/// Error type for discovery operations.
///
/// A receive timeout is not represented here: it is the normal end of a
/// search round and never surfaces to callers.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Socket creation, option, send or receive failures
    #[error("Network error: {0}")]
    Network(String),

    /// A reply that does not carry the headers a bridge advertisement needs
    #[error("Malformed advertisement: {0}")]
    MalformedAdvertisement(String),

    /// Fetching or parsing the advertised description document failed
    #[error("Description error: {0}")]
    Description(String),
}

/// Convenience Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
