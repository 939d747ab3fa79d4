use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Claims;
use crate::token::Role;
use crate::token::Subject;
use crate::token::TokenError;
use crate::token::TokenHandler;

/// Credential coordinator combining password verification and token issuance.
///
/// The issuing service uses the full surface; verifying services only need
/// [`verify_token`](Authenticator::verify_token), which is a pure function of
/// the token and the shared secret.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_handler: TokenHandler,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_handler: TokenHandler::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against the stored hash and issue a credential for
    /// the subject, with the default one-hour lifetime.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match the stored hash
    /// * `PasswordError` - Stored hash is unparsable
    /// * `TokenError` - Signing failed
    pub fn login(
        &self,
        password: &str,
        stored_hash: &str,
        username: &str,
        role: Role,
    ) -> Result<String, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let claims = Claims::for_subject(username, role);
        Ok(self.token_handler.issue(&claims)?)
    }

    /// Verify a presented token and recover its subject.
    ///
    /// # Errors
    /// * `TokenError` - Bad signature, expired, or malformed payload
    pub fn verify_token(&self, token: &str) -> Result<Subject, TokenError> {
        self.token_handler.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_login_issues_verifiable_token() {
        let authenticator = Authenticator::new(SECRET);

        let hash = authenticator
            .hash_password("pw1")
            .expect("Failed to hash password");

        let token = authenticator
            .login("pw1", &hash, "alice", Role::Admin)
            .expect("Login failed");

        let subject = authenticator
            .verify_token(&token)
            .expect("Token verification failed");
        assert_eq!(subject.username, "alice");
        assert_eq!(subject.role, Role::Admin);
    }

    #[test]
    fn test_login_wrong_password() {
        let authenticator = Authenticator::new(SECRET);

        let hash = authenticator.hash_password("pw1").unwrap();
        let result = authenticator.login("wrong", &hash, "alice", Role::User);

        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_token_stored_role_round_trip() {
        let authenticator = Authenticator::new(SECRET);

        let hash = authenticator.hash_password("pw2").unwrap();
        let token = authenticator.login("pw2", &hash, "bob", Role::User).unwrap();

        let subject = authenticator.verify_token(&token).unwrap();
        assert_eq!(subject.role, Role::User);
    }
}
