use thiserror::Error;

/// Error type for credential encode/verify operations.
///
/// Verification failures map directly onto the protocol taxonomy: a bad
/// signature, an expired credential, or a payload missing the required
/// subject fields. Nothing here is ever thrown for control flow; every
/// failure path is a returned value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token payload is malformed: {0}")]
    MalformedPayload(String),
}
