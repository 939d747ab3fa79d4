use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::routing::post;
use axum::Json;
use axum::Router;
use book_service::domain::book::errors::BookError;
use book_service::domain::book::models::Book;
use book_service::domain::book::ports::BookRepository;
use book_service::domain::book::service::BookService;
use book_service::inbound::http::router::create_router;
use discovery::AuthClient;
use discovery::StaticLocator;
use serde_json::json;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const USER_TOKEN: &str = "alice-token";

/// In-memory book store with the same atomicity guarantees the Mongo
/// implementation provides: a unique id constraint and a conditional
/// decrement that never drives stock negative.
#[derive(Default)]
pub struct InMemoryBookRepository {
    books: Mutex<HashMap<i64, Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn insert(&self, book: Book) -> Result<Book, BookError> {
        let mut books = self.books.lock().unwrap();
        if books.contains_key(&book.id) {
            return Err(BookError::DuplicateId(book.id));
        }
        books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, BookError> {
        Ok(self.books.lock().unwrap().get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        let mut books: Vec<Book> = self.books.lock().unwrap().values().cloned().collect();
        books.sort_by_key(|b| b.id);
        Ok(books)
    }

    async fn update(&self, book: Book) -> Result<Book, BookError> {
        let mut books = self.books.lock().unwrap();
        if !books.contains_key(&book.id) {
            return Err(BookError::NotFound(book.id));
        }
        books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn delete(&self, id: i64) -> Result<(), BookError> {
        match self.books.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err(BookError::NotFound(id)),
        }
    }

    async fn decrement_quantity(&self, id: i64, quantity: i64) -> Result<(), BookError> {
        let mut books = self.books.lock().unwrap();
        let book = books.get_mut(&id).ok_or(BookError::NotFound(id))?;
        if quantity > 0 && book.quantity < quantity {
            return Err(BookError::InsufficientStock(id));
        }
        book.quantity -= quantity;
        Ok(())
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

        let repository = Arc::new(InMemoryBookRepository::new());
        let service = Arc::new(BookService::new(repository));

        let locator = Arc::new(StaticLocator::new().with_service("auth-service", verifier_address));
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

    /// Seed a book through the admin endpoint.
    pub async fn seed_book(&self, id: i64, title: &str, quantity: i64) {
        let response = self
            .post("/books")
            .header("Authorization", format!("Bearer {}", ADMIN_TOKEN))
            .json(&json!({
                "id": id,
                "title": title,
                "author": "Test Author",
                "category": "test",
                "quantity": quantity,
            }))
            .send()
            .await
            .expect("Failed to reach test server");

        assert_eq!(response.status().as_u16(), 201);
    }
}
