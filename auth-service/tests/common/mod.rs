use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth_service::domain::account::errors::AccountError;
use auth_service::domain::account::models::Account;
use auth_service::domain::account::ports::AccountRepository;
use auth_service::domain::account::service::AuthService;
use auth_service::inbound::http::router::create_router;

pub const TEST_JWT_SECRET: &[u8] = b"integration_test_secret_32_bytes!!";

/// In-memory account store with the same atomicity guarantees the Mongo
/// implementation provides: unique usernames and a one-shot bootstrap claim.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<String, Account>>,
    bootstrap_claimed_by: Mutex<Option<String>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.lock().unwrap().get(username).cloned())
    }

    async fn insert(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&account.username) {
            return Err(AccountError::DuplicateUsername(account.username));
        }
        accounts.insert(account.username.clone(), account.clone());
        Ok(account)
    }

    async fn claim_bootstrap_admin(&self, username: &str) -> Result<bool, AccountError> {
        let mut claimed_by = self.bootstrap_claimed_by.lock().unwrap();
        if claimed_by.is_none() {
            *claimed_by = Some(username.to_string());
            return Ok(true);
        }
        Ok(false)
    }

    async fn release_bootstrap_admin(&self, username: &str) -> Result<(), AccountError> {
        let mut claimed_by = self.bootstrap_claimed_by.lock().unwrap();
        if claimed_by.as_deref() == Some(username) {
            *claimed_by = None;
        }
        Ok(())
    }

    async fn record_issued_token(&self, username: &str, token: &str) -> Result<(), AccountError> {
        if let Some(account) = self.accounts.lock().unwrap().get_mut(username) {
            account.last_issued_token = Some(token.to_string());
        }
        Ok(())
    }
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let repository = Arc::new(InMemoryAccountRepository::new());
        let authenticator = Arc::new(Authenticator::new(TEST_JWT_SECRET));
        let service = Arc::new(AuthService::new(repository, Arc::clone(&authenticator)));

        let app = create_router(service, authenticator);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind ephemeral port");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server crashed");
        });

        Self {
            address,
            client: reqwest::Client::new(),
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(format!("{}{}", self.address, path))
    }
}
