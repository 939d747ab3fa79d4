use auth::Role;
use chrono::DateTime;
use chrono::Utc;

/// An account as administered here. Same store the credential issuer
/// registers into; this service is the admin-facing maintenance surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub username: String,
    pub name: String,
    pub age: i64,
    pub address: String,
    pub role: Role,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub username: String,
    pub password: String,
    pub name: String,
    pub age: i64,
    pub address: String,
    /// Admin-driven role assignment; defaults to `User` when absent.
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUserCommand {
    pub password: Option<String>,
    pub name: Option<String>,
    pub age: Option<i64>,
    pub address: Option<String>,
    pub role: Option<Role>,
}
