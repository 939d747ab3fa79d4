use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Role;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::LoginOutcome;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AuthServicePort;

/// Credential issuer: registration and login against stored password hashes.
pub struct AuthService<R>
where
    R: AccountRepository,
{
    repository: Arc<R>,
    authenticator: Arc<Authenticator>,
}

impl<R> AuthService<R>
where
    R: AccountRepository,
{
    pub fn new(repository: Arc<R>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<R> AuthServicePort for AuthService<R>
where
    R: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError> {
        if command.username.is_empty() {
            return Err(AccountError::MissingField("username"));
        }
        if command.password.is_empty() {
            return Err(AccountError::MissingField("password"));
        }
        if command.name.is_empty() {
            return Err(AccountError::MissingField("name"));
        }

        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(AccountError::DuplicateUsername(command.username));
        }

        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| AccountError::Password(e.to_string()))?;

        // First registration on a fresh store wins the admin role; the claim
        // is atomic at the repository so concurrent registrations cannot
        // both become admin.
        let won_claim = self
            .repository
            .claim_bootstrap_admin(&command.username)
            .await?;
        let role = if won_claim { Role::Admin } else { Role::User };

        let now = Utc::now();
        let username = command.username.clone();
        let account = Account {
            username: command.username,
            name: command.name,
            age: command.age,
            address: command.address,
            role,
            password_hash,
            last_issued_token: None,
            created_at: now,
            updated_at: now,
        };

        let created = match self.repository.insert(account).await {
            Ok(created) => created,
            Err(e) => {
                // A won claim belongs to a successful registration. Give the
                // marker back so the first registration that actually lands
                // still becomes admin.
                if won_claim {
                    if let Err(release_error) =
                        self.repository.release_bootstrap_admin(&username).await
                    {
                        tracing::warn!(
                            username = %username,
                            error = %release_error,
                            "Failed to release bootstrap-admin marker after failed insert"
                        );
                    }
                }
                return Err(e);
            }
        };

        tracing::info!(username = %created.username, role = %created.role, "Account registered");

        Ok(created)
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AccountError> {
        let account = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let token = self
            .authenticator
            .login(password, &account.password_hash, &account.username, account.role)
            .map_err(|e| match e {
                auth::AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
                auth::AuthenticationError::PasswordError(err) => {
                    AccountError::Password(err.to_string())
                }
                auth::AuthenticationError::TokenError(err) => AccountError::Token(err.to_string()),
            })?;

        // Audit only; a failure here must not block the login.
        if let Err(e) = self
            .repository
            .record_issued_token(&account.username, &token)
            .await
        {
            tracing::warn!(username = %account.username, error = %e, "Failed to record issued token");
        }

        Ok(LoginOutcome {
            token,
            username: account.username,
            role: account.role,
        })
    }
}
