use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::Subject;
use super::errors::TokenError;

/// Signs and verifies credentials with a shared secret (HS256).
///
/// The same secret must be configured on the issuer and on every verifying
/// service; a mismatch silently rejects all credentials.
pub struct TokenHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey<'static>,
    algorithm: Algorithm,
}

impl TokenHandler {
    /// Create a handler from the shared signing secret.
    ///
    /// The secret should be at least 256 bits and come from configuration,
    /// never from source.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret).into_static(),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims into a token string.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a presented token and recover its subject.
    ///
    /// Checks the signature against the shared secret and enforces the
    /// embedded expiry. The caller is expected to have normalized the token
    /// with [`strip_bearer`](crate::strip_bearer) already.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signed with a different secret
    /// * `Expired` - Past the embedded expiry timestamp
    /// * `MalformedPayload` - Not a token, or subject fields are missing
    pub fn verify(&self, token: &str) -> Result<Subject, TokenError> {
        let validation = Validation::new(self.algorithm);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    other => TokenError::MalformedPayload(format!("{:?}", other)),
                }
            })?;

        Ok(token_data.claims.sub)
    }
}
