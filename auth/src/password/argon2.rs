use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Password hashing for stored account credentials.
///
/// Argon2id with a random per-password salt. Verification is constant-time
/// with respect to the hash comparison.
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password for storage.
    ///
    /// Returns a PHC string carrying the algorithm, parameters, salt, and
    /// digest, so verification needs no out-of-band state.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored PHC hash.
    ///
    /// A mismatch is `Ok(false)`, not an error; only an unparsable stored
    /// hash fails.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a valid PHC string
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(stored_hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();

        let hash = hasher.hash("pw1").expect("Failed to hash password");
        assert!(hash.starts_with("$argon2"));

        assert!(hasher.verify("pw1", &hash).expect("Failed to verify"));
        assert!(!hasher.verify("pw2", &hash).expect("Failed to verify"));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        // Per-password salt: two hashes of the same input must differ.
        let hasher = PasswordHasher::new();

        let first = hasher.hash("pw1").unwrap();
        let second = hasher.hash("pw1").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_invalid_stored_hash() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify("pw1", "not-a-phc-string").is_err());
    }
}
