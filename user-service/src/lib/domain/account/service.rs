use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::Role;
use chrono::Utc;

use crate::domain::account::errors::UserError;
use crate::domain::account::models::Account;
use crate::domain::account::models::CreateUserCommand;
use crate::domain::account::models::UpdateUserCommand;
use crate::domain::account::ports::UserRepository;
use crate::domain::account::ports::UserServicePort;

/// Domain service for account maintenance.
pub struct UserService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    password_hasher: Arc<PasswordHasher>,
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    pub fn new(repository: Arc<R>, password_hasher: Arc<PasswordHasher>) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<R> UserServicePort for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<Account>, UserError> {
        self.repository.list_all().await
    }

    async fn get_user(&self, username: &str) -> Result<Account, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }

    async fn create_user(&self, command: CreateUserCommand) -> Result<Account, UserError> {
        if let Some(_existing) = self.repository.find_by_username(&command.username).await? {
            return Err(UserError::DuplicateUsername(command.username));
        }

        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|_| UserError::Password)?;

        let now = Utc::now();
        let account = Account {
            username: command.username,
            name: command.name,
            age: command.age,
            address: command.address,
            role: command.role.unwrap_or(Role::User),
            password_hash,
            created_at: now,
            updated_at: now,
        };

        self.repository.insert(account).await
    }

    async fn update_user(
        &self,
        username: &str,
        command: UpdateUserCommand,
    ) -> Result<Account, UserError> {
        let mut account = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| UserError::NotFound(username.to_string()))?;

        if let Some(password) = command.password {
            account.password_hash = self
                .password_hasher
                .hash(&password)
                .map_err(|_| UserError::Password)?;
        }
        if let Some(name) = command.name {
            account.name = name;
        }
        if let Some(age) = command.age {
            account.age = age;
        }
        if let Some(address) = command.address {
            account.address = address;
        }
        if let Some(role) = command.role {
            account.role = role;
        }
        account.updated_at = Utc::now();

        self.repository.update(account).await
    }

    async fn delete_user(&self, username: &str) -> Result<(), UserError> {
        self.repository.delete(username).await
    }
}
