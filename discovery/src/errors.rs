use thiserror::Error;

/// Error type for registry interactions.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Registry request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Registry rejected the request with status {0}")]
    Rejected(u16),
}
