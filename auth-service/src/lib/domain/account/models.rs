use auth::Role;
use chrono::DateTime;
use chrono::Utc;

/// Account aggregate owned by the credential issuer.
///
/// Keyed by username. `last_issued_token` is an audit-only field recording
/// the most recently issued credential; the verifier never consults it.
#[derive(Debug, Clone)]
pub struct Account {
    pub username: String,
    pub name: String,
    pub age: i64,
    pub address: String,
    pub role: Role,
    pub password_hash: String,
    pub last_issued_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Command to register a new account. Field presence has already been
/// validated at the HTTP boundary; the service checks for empty values.
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: String,
    pub password: String,
    pub name: String,
    pub age: i64,
    pub address: String,
}

/// Result of a successful login: the credential plus the identity it binds.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub username: String,
    pub role: Role,
}
