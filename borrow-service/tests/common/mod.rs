use std::collections::HashMap;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::routing::post;
use axum::Json;
use axum::Router;
use borrow_service::domain::loan::errors::LoanError;
use borrow_service::domain::loan::models::Loan;
use borrow_service::domain::loan::ports::LoanRepository;
use borrow_service::domain::loan::service::LoanService;
use borrow_service::inbound::http::router::create_router;
use borrow_service::outbound::clients::HttpBookInventory;
use chrono::DateTime;
use chrono::Utc;
use discovery::AuthClient;
use discovery::ServiceLocator;
use discovery::StaticLocator;
use serde_json::json;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const ALICE_TOKEN: &str = "alice-token";
pub const BOB_TOKEN: &str = "bob-token";

/// In-memory loan store with an atomic borrow-id sequence.
#[derive(Default)]
pub struct InMemoryLoanRepository {
    loans: Mutex<HashMap<i64, Loan>>,
    sequence: AtomicI64,
}

impl InMemoryLoanRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoanRepository for InMemoryLoanRepository {
    async fn next_borrow_id(&self) -> Result<i64, LoanError> {
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn insert(&self, loan: Loan) -> Result<Loan, LoanError> {
        self.loans.lock().unwrap().insert(loan.borrow_id, loan.clone());
        Ok(loan)
    }

    async fn find_by_id(&self, borrow_id: i64) -> Result<Option<Loan>, LoanError> {
        Ok(self.loans.lock().unwrap().get(&borrow_id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Loan>, LoanError> {
        let mut loans: Vec<Loan> = self.loans.lock().unwrap().values().cloned().collect();
        loans.sort_by_key(|l| l.borrow_id);
        Ok(loans)
    }

    async fn list_by_username(&self, username: &str) -> Result<Vec<Loan>, LoanError> {
        let mut loans: Vec<Loan> = self
            .loans
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.username == username)
            .cloned()
            .collect();
        loans.sort_by_key(|l| l.borrow_id);
        Ok(loans)
    }

    async fn mark_returned(
        &self,
        borrow_id: i64,
        returned_at: DateTime<Utc>,
    ) -> Result<(), LoanError> {
        let mut loans = self.loans.lock().unwrap();
        let loan = loans
            .get_mut(&borrow_id)
            .ok_or(LoanError::LoanNotFound(borrow_id))?;
        loan.status = borrow_service::domain::loan::models::LoanStatus::Returned;
        loan.actual_return_date = Some(returned_at);
        Ok(())
    }

    async fn delete(&self, borrow_id: i64) -> Result<(), LoanError> {
        match self.loans.lock().unwrap().remove(&borrow_id) {
            Some(_) => Ok(()),
            None => Err(LoanError::LoanNotFound(borrow_id)),
        }
    }
}

/// Stand-in credential verifier that accepts three fixed tokens.
async fn fake_verify(headers: axum::http::HeaderMap) -> Json<serde_json::Value> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(auth::strip_bearer)
        .unwrap_or("");

    let body = match token {
        ADMIN_TOKEN => json!({ "valid": true, "username": "root", "role": "admin" }),
        ALICE_TOKEN => json!({ "valid": true, "username": "alice", "role": "user" }),
        BOB_TOKEN => json!({ "valid": true, "username": "bob", "role": "user" }),
        _ => json!({ "valid": false, "error": "Invalid token" }),
    };

    Json(body)
}

#[derive(Clone)]
pub struct FakeBook {
    pub title: String,
    pub quantity: i64,
}

pub type FakeShelf = Arc<Mutex<HashMap<i64, FakeBook>>>;

async fn fake_get_book(
    State(shelf): State<FakeShelf>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let shelf = shelf.lock().unwrap();
    let book = shelf.get(&id).ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(json!({
        "id": id,
        "title": book.title,
        "quantity": book.quantity,
    })))
}

/// Conditional decrement under the shelf lock, mirroring the book service's
/// atomic update: removals that do not fit the stock answer 409.
async fn fake_decrease(
    State(shelf): State<FakeShelf>,
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let quantity = body["quantity"].as_i64().ok_or(StatusCode::BAD_REQUEST)?;

    let mut shelf = shelf.lock().unwrap();
    let book = shelf.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if quantity > 0 && book.quantity < quantity {
        return Err(StatusCode::CONFLICT);
    }
    book.quantity -= quantity;

    Ok(Json(json!({ "message": "Quantity updated" })))
}

async fn spawn_router(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind ephemeral port");
    let address = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server crashed");
    });

    address
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub shelf: FakeShelf,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let verifier_address =
            spawn_router(Router::new().route("/auth/verify", post(fake_verify))).await;

        let shelf: FakeShelf = Arc::new(Mutex::new(HashMap::new()));
        let inventory_address = spawn_router(
            Router::new()
                .route("/books/:id", get(fake_get_book))
                .route("/books/:id/decrease", post(fake_decrease))
                .with_state(Arc::clone(&shelf)),
        )
        .await;

        let locator: Arc<dyn ServiceLocator> = Arc::new(
            StaticLocator::new()
                .with_service("auth-service", verifier_address)
                .with_service("book-service", inventory_address),
        );

        let guard = Arc::new(
            AuthClient::new(Arc::clone(&locator), "auth-service").expect("Failed to build guard"),
        );
        let inventory = Arc::new(
            HttpBookInventory::new(Arc::clone(&locator), "book-service")
                .expect("Failed to build inventory client"),
        );

        let repository = Arc::new(InMemoryLoanRepository::new());
        let service = Arc::new(LoanService::new(repository, inventory));

        let address = spawn_router(create_router(service, guard)).await;

        Self {
            address,
            client: reqwest::Client::new(),
            shelf,
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.delete(format!("{}{}", self.address, path))
    }

    pub fn stock_book(&self, id: i64, title: &str, quantity: i64) {
        self.shelf.lock().unwrap().insert(
            id,
            FakeBook {
                title: title.to_string(),
                quantity,
            },
        );
    }

    pub fn book_quantity(&self, id: i64) -> i64 {
        self.shelf.lock().unwrap()[&id].quantity
    }
}
