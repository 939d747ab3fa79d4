//! Credential library shared by every service in the platform.
//!
//! Provides the two halves of the cross-service authentication protocol:
//! - Password hashing (Argon2id, salted, memory-hard)
//! - Signed, time-limited tokens binding a `{username, role}` subject
//!
//! Token verification is a pure function of the token and the shared signing
//! secret, so any service holding the secret can verify independently without
//! a round trip to the credential store.
//!
//! # Examples
//!
//! ```
//! use auth::{Authenticator, Role};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Registration: hash the password for storage.
//! let hash = auth.hash_password("pw1").unwrap();
//!
//! // Login: verify the password and issue a credential.
//! let token = auth.login("pw1", &hash, "alice", Role::Admin).unwrap();
//!
//! // Any service: recover the subject from the presented token.
//! let subject = auth.verify_token(&token).unwrap();
//! assert_eq!(subject.username, "alice");
//! assert_eq!(subject.role, Role::Admin);
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::strip_bearer;
pub use token::Claims;
pub use token::Role;
pub use token::Subject;
pub use token::TokenError;
pub use token::TokenHandler;
