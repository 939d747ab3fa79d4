use async_trait::async_trait;

use crate::domain::account::errors::UserError;
use crate::domain::account::models::Account;
use crate::domain::account::models::CreateUserCommand;
use crate::domain::account::models::UpdateUserCommand;

/// Port for account maintenance. Every operation here is admin-only; the
/// HTTP layer enforces that before calling in.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    async fn list_users(&self) -> Result<Vec<Account>, UserError>;

    async fn get_user(&self, username: &str) -> Result<Account, UserError>;

    async fn create_user(&self, command: CreateUserCommand) -> Result<Account, UserError>;

    async fn update_user(
        &self,
        username: &str,
        command: UpdateUserCommand,
    ) -> Result<Account, UserError>;

    async fn delete_user(&self, username: &str) -> Result<(), UserError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    async fn insert(&self, account: Account) -> Result<Account, UserError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, UserError>;

    async fn list_all(&self) -> Result<Vec<Account>, UserError>;

    async fn update(&self, account: Account) -> Result<Account, UserError>;

    async fn delete(&self, username: &str) -> Result<(), UserError>;
}
