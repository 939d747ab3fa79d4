use async_trait::async_trait;
use chrono::DateTime as ChronoDateTime;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::DateTime;
use mongodb::options::FindOneAndUpdateOptions;
use mongodb::options::FindOptions;
use mongodb::options::IndexOptions;
use mongodb::options::ReturnDocument;
use mongodb::Client;
use mongodb::Collection;
use mongodb::IndexModel;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::loan::errors::LoanError;
use crate::domain::loan::models::Loan;
use crate::domain::loan::models::LoanStatus;
use crate::domain::loan::ports::LoanRepository;

const DATABASE: &str = "borrowdb";

/// Document shape stored in `borrowdb.borrows`.
#[derive(Debug, Serialize, Deserialize)]
struct LoanDocument {
    borrow_id: i64,
    username: String,
    book_id: i64,
    book_title: String,
    quantity: i64,
    days: i64,
    borrow_date: DateTime,
    due_date: DateTime,
    status: LoanStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    actual_return_date: Option<DateTime>,
}

/// Counter document backing the monotonic borrow-id sequence.
#[derive(Debug, Serialize, Deserialize)]
struct SequenceDocument {
    #[serde(rename = "_id")]
    id: String,
    seq: i64,
}

impl From<Loan> for LoanDocument {
    fn from(loan: Loan) -> Self {
        Self {
            borrow_id: loan.borrow_id,
            username: loan.username,
            book_id: loan.book_id,
            book_title: loan.book_title,
            quantity: loan.quantity,
            days: loan.days,
            borrow_date: DateTime::from_chrono(loan.borrow_date),
            due_date: DateTime::from_chrono(loan.due_date),
            status: loan.status,
            actual_return_date: loan.actual_return_date.map(DateTime::from_chrono),
        }
    }
}

impl From<LoanDocument> for Loan {
    fn from(document: LoanDocument) -> Self {
        Self {
            borrow_id: document.borrow_id,
            username: document.username,
            book_id: document.book_id,
            book_title: document.book_title,
            quantity: document.quantity,
            days: document.days,
            borrow_date: document.borrow_date.to_chrono(),
            due_date: document.due_date.to_chrono(),
            status: document.status,
            actual_return_date: document.actual_return_date.map(|d| d.to_chrono()),
        }
    }
}

pub struct MongoLoanRepository {
    loans: Collection<LoanDocument>,
    counters: Collection<SequenceDocument>,
}

impl MongoLoanRepository {
    pub fn new(client: &Client) -> Self {
        let database = client.database(DATABASE);
        Self {
            loans: database.collection("borrows"),
            counters: database.collection("counters"),
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), LoanError> {
        let unique_id = IndexModel::builder()
            .keys(doc! { "borrow_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let by_username = IndexModel::builder().keys(doc! { "username": 1 }).build();

        self.loans
            .create_indexes([unique_id, by_username], None)
            .await
            .map_err(|e| LoanError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn collect(
        &self,
        filter: mongodb::bson::Document,
    ) -> Result<Vec<Loan>, LoanError> {
        let options = FindOptions::builder().sort(doc! { "borrow_id": 1 }).build();

        let cursor = self
            .loans
            .find(filter, options)
            .await
            .map_err(|e| LoanError::DatabaseError(e.to_string()))?;

        let documents: Vec<LoanDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| LoanError::DatabaseError(e.to_string()))?;

        Ok(documents.into_iter().map(Loan::from).collect())
    }
}

#[async_trait]
impl LoanRepository for MongoLoanRepository {
    async fn next_borrow_id(&self) -> Result<i64, LoanError> {
        // One atomic $inc on a singleton counter; concurrent borrows each
        // observe a distinct post-increment value.
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .counters
            .find_one_and_update(
                doc! { "_id": "borrow_id" },
                doc! { "$inc": { "seq": 1 } },
                options,
            )
            .await
            .map_err(|e| LoanError::DatabaseError(e.to_string()))?
            .ok_or_else(|| LoanError::DatabaseError("Counter upsert returned nothing".to_string()))?;

        Ok(counter.seq)
    }

    async fn insert(&self, loan: Loan) -> Result<Loan, LoanError> {
        let document = LoanDocument::from(loan.clone());

        self.loans
            .insert_one(&document, None)
            .await
            .map_err(|e| LoanError::DatabaseError(e.to_string()))?;

        Ok(loan)
    }

    async fn find_by_id(&self, borrow_id: i64) -> Result<Option<Loan>, LoanError> {
        let document = self
            .loans
            .find_one(doc! { "borrow_id": borrow_id }, None)
            .await
            .map_err(|e| LoanError::DatabaseError(e.to_string()))?;

        Ok(document.map(Loan::from))
    }

    async fn list_all(&self) -> Result<Vec<Loan>, LoanError> {
        self.collect(doc! {}).await
    }

    async fn list_by_username(&self, username: &str) -> Result<Vec<Loan>, LoanError> {
        self.collect(doc! { "username": username }).await
    }

    async fn mark_returned(
        &self,
        borrow_id: i64,
        returned_at: ChronoDateTime<Utc>,
    ) -> Result<(), LoanError> {
        let result = self
            .loans
            .update_one(
                doc! { "borrow_id": borrow_id },
                doc! { "$set": {
                    "status": "returned",
                    "actual_return_date": DateTime::from_chrono(returned_at),
                }},
                None,
            )
            .await
            .map_err(|e| LoanError::DatabaseError(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(LoanError::LoanNotFound(borrow_id));
        }

        Ok(())
    }

    async fn delete(&self, borrow_id: i64) -> Result<(), LoanError> {
        let result = self
            .loans
            .delete_one(doc! { "borrow_id": borrow_id }, None)
            .await
            .map_err(|e| LoanError::DatabaseError(e.to_string()))?;

        if result.deleted_count == 0 {
            return Err(LoanError::LoanNotFound(borrow_id));
        }

        Ok(())
    }
}
