use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::LoginOutcome;
use crate::domain::account::models::RegisterCommand;

/// Port for credential-issuer operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// The first account ever registered in a fresh system is assigned the
    /// admin role; every later one defaults to user.
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `MissingField` - A required field is empty
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError>;

    /// Validate credentials and issue a signed, time-limited token binding
    /// `{username, role}`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError>;

    /// Persist a new account. Duplicate usernames are rejected here too, so
    /// a race between two registrations cannot create both.
    async fn insert(&self, account: Account) -> Result<Account, AccountError>;

    /// Atomically claim the one-time bootstrap-admin marker.
    ///
    /// Returns true for exactly one caller over the lifetime of the store,
    /// even when two registrations land concurrently on an empty system.
    async fn claim_bootstrap_admin(&self, username: &str) -> Result<bool, AccountError>;

    /// Give the bootstrap-admin marker back after a won claim whose account
    /// insert did not go through, so a later registration can still become
    /// the first admin. Only releases a marker claimed by `username`.
    async fn release_bootstrap_admin(&self, username: &str) -> Result<(), AccountError>;

    /// Record the most recently issued token against the account. Audit
    /// only; never re-validated.
    async fn record_issued_token(&self, username: &str, token: &str) -> Result<(), AccountError>;
}
