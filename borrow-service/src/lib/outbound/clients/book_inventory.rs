use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use discovery::ServiceLocator;
use serde_json::json;

use crate::domain::loan::errors::LoanError;
use crate::domain::loan::models::BookSummary;
use crate::domain::loan::ports::BookInventory;

const INVENTORY_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP adapter to the book service, located per call through the registry.
pub struct HttpBookInventory {
    locator: Arc<dyn ServiceLocator>,
    http: reqwest::Client,
    book_service_name: String,
}

impl HttpBookInventory {
    pub fn new(
        locator: Arc<dyn ServiceLocator>,
        book_service_name: impl Into<String>,
    ) -> Result<Self, LoanError> {
        let http = reqwest::Client::builder()
            .timeout(INVENTORY_TIMEOUT)
            .build()
            .map_err(|e| LoanError::InventoryUpdateFailed(e.to_string()))?;

        Ok(Self {
            locator,
            http,
            book_service_name: book_service_name.into(),
        })
    }

    /// The decrease endpoint takes a signed quantity: positive removes
    /// stock, negative restocks.
    async fn decrease(&self, book_id: i64, quantity: i64) -> Result<(), LoanError> {
        let base_url = self.locator.locate(&self.book_service_name).await;

        let response = self
            .http
            .post(format!("{}/books/{}/decrease", base_url, book_id))
            .json(&json!({ "quantity": quantity }))
            .send()
            .await
            .map_err(|e| LoanError::InventoryUpdateFailed(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            reqwest::StatusCode::NOT_FOUND => Err(LoanError::BookNotFound(book_id)),
            reqwest::StatusCode::CONFLICT => Err(LoanError::InsufficientStock(book_id)),
            status => Err(LoanError::InventoryUpdateFailed(format!(
                "Inventory answered {}",
                status
            ))),
        }
    }
}

#[async_trait]
impl BookInventory for HttpBookInventory {
    async fn fetch(&self, book_id: i64) -> Result<BookSummary, LoanError> {
        let base_url = self.locator.locate(&self.book_service_name).await;

        let response = self
            .http
            .get(format!("{}/books/{}", base_url, book_id))
            .send()
            .await
            .map_err(|e| LoanError::InventoryUpdateFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LoanError::BookNotFound(book_id));
        }
        if !response.status().is_success() {
            return Err(LoanError::InventoryUpdateFailed(format!(
                "Inventory answered {}",
                response.status()
            )));
        }

        response
            .json::<BookSummary>()
            .await
            .map_err(|e| LoanError::InventoryUpdateFailed(e.to_string()))
    }

    async fn withdraw(&self, book_id: i64, quantity: i64) -> Result<(), LoanError> {
        self.decrease(book_id, quantity).await
    }

    async fn restock(&self, book_id: i64, quantity: i64) -> Result<(), LoanError> {
        self.decrease(book_id, -quantity).await
    }
}
