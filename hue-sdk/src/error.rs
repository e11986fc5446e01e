use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Discovery error: {0}")]
    Discovery(#[from] hue_discovery::DiscoveryError),

    #[error("API error: {0}")]
    Api(#[from] hue_api::ApiError),

    #[error("No bridge found on the local network")]
    BridgeNotFound,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SdkError>;
