use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::PasswordHasher;
use axum::routing::post;
use axum::Json;
use axum::Router;
use discovery::AuthClient;
use discovery::ServiceLocator;
use discovery::StaticLocator;
use serde_json::json;
use user_service::domain::account::errors::UserError;
use user_service::domain::account::models::Account;
use user_service::domain::account::ports::UserRepository;
use user_service::domain::account::service::UserService;
use user_service::inbound::http::router::create_router;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const USER_TOKEN: &str = "alice-token";

/// In-memory account store with a unique-username constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<HashMap<String, Account>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: Account) -> Result<Account, UserError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&account.username) {
            return Err(UserError::DuplicateUsername(account.username));
        }
        accounts.insert(account.username.clone(), account.clone());
        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, UserError> {
        Ok(self.accounts.lock().unwrap().get(username).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Account>, UserError> {
        let mut accounts: Vec<Account> =
            self.accounts.lock().unwrap().values().cloned().collect();
        accounts.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(accounts)
    }

    async fn update(&self, account: Account) -> Result<Account, UserError> {
        let mut accounts = self.accounts.lock().unwrap();
        if !accounts.contains_key(&account.username) {
            return Err(UserError::NotFound(account.username));
        }
        accounts.insert(account.username.clone(), account.clone());
        Ok(account)
    }

    async fn delete(&self, username: &str) -> Result<(), UserError> {
        match self.accounts.lock().unwrap().remove(username) {
            Some(_) => Ok(()),
            None => Err(UserError::NotFound(username.to_string())),
        }
    }
}

/// Stand-in credential verifier that accepts two fixed tokens.
async fn fake_verify(headers: axum::http::HeaderMap) -> Json<serde_json::Value> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(auth::strip_bearer)
        .unwrap_or("");

    let body = match token {
        ADMIN_TOKEN => json!({ "valid": true, "username": "root", "role": "admin" }),
        USER_TOKEN => json!({ "valid": true, "username": "alice", "role": "user" }),
        _ => json!({ "valid": false, "error": "Invalid token" }),
    };

    Json(body)
}

async fn spawn_fake_verifier() -> String {
    let app = Router::new().route("/auth/verify", post(fake_verify));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind ephemeral port");
    let address = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Verifier crashed");
    });

    address
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let verifier_address = spawn_fake_verifier().await;

        let repository = Arc::new(InMemoryUserRepository::new());
        let service = Arc::new(UserService::new(repository, Arc::new(PasswordHasher::new())));

        let locator: Arc<dyn ServiceLocator> =
            Arc::new(StaticLocator::new().with_service("auth-service", verifier_address));
        let guard =
            Arc::new(AuthClient::new(locator, "auth-service").expect("Failed to build guard"));

        let app = create_router(service, guard);

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

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.put(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.delete(format!("{}{}", self.address, path))
    }

    /// Seed an account through the admin endpoint.
    pub async fn seed_user(&self, username: &str, role: &str) {
        let response = self
            .post("/user-api/users")
            .header("Authorization", format!("Bearer {}", ADMIN_TOKEN))
            .json(&json!({
                "username": username,
                "password": "password1",
                "name": "Seeded User",
                "age": 30,
                "address": "1 Main St",
                "role": role,
            }))
            .send()
            .await
            .expect("Failed to reach test server");

        assert_eq!(response.status().as_u16(), 201);
    }
}
