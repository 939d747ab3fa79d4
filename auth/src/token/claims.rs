use std::fmt;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Role carried by every credential.
///
/// The first account registered in a fresh system is an admin; every later
/// account defaults to `User` unless an admin assigns otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

/// Identity bound into a credential: who the caller is and what they may do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub username: String,
    pub role: Role,
}

/// Token payload.
///
/// The subject is exactly `{username, role}`; `iat`/`exp` are Unix
/// timestamps. Expiry is enforced by the verifier, never trusted from the
/// client side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Subject,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Default credential lifetime.
    pub const DEFAULT_TTL_SECONDS: i64 = 60 * 60;

    /// Build claims for a freshly authenticated subject with the default
    /// one-hour lifetime.
    pub fn for_subject(username: impl Into<String>, role: Role) -> Self {
        Self::with_ttl(username, role, Duration::seconds(Self::DEFAULT_TTL_SECONDS))
    }

    /// Build claims with an explicit lifetime.
    pub fn with_ttl(username: impl Into<String>, role: Role, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: Subject {
                username: username.into(),
                role,
            },
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}
