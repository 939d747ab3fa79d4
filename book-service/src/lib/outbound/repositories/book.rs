use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::DateTime;
use mongodb::error::ErrorKind;
use mongodb::error::WriteFailure;
use mongodb::options::IndexOptions;
use mongodb::Client;
use mongodb::Collection;
use mongodb::IndexModel;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::ports::BookRepository;

const DATABASE: &str = "bookdb";

/// Document shape stored in `bookdb.books`. Books are addressed by the
/// caller-assigned numeric `id`, not by the Mongo `_id`.
#[derive(Debug, Serialize, Deserialize)]
struct BookDocument {
    id: i64,
    title: String,
    author: String,
    category: String,
    quantity: i64,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<Book> for BookDocument {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            category: book.category,
            quantity: book.quantity,
            created_at: DateTime::from_chrono(book.created_at),
            updated_at: DateTime::from_chrono(book.updated_at),
        }
    }
}

impl From<BookDocument> for Book {
    fn from(document: BookDocument) -> Self {
        Self {
            id: document.id,
            title: document.title,
            author: document.author,
            category: document.category,
            quantity: document.quantity,
            created_at: document.created_at.to_chrono(),
            updated_at: document.updated_at.to_chrono(),
        }
    }
}

pub struct MongoBookRepository {
    books: Collection<BookDocument>,
}

impl MongoBookRepository {
    pub fn new(client: &Client) -> Self {
        let database = client.database(DATABASE);
        Self {
            books: database.collection("books"),
        }
    }

    /// Unique index on the numeric id; backs the duplicate-creation guard
    /// under concurrency.
    pub async fn ensure_indexes(&self) -> Result<(), BookError> {
        let model = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.books
            .create_index(model, None)
            .await
            .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    match &*e.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        _ => false,
    }
}

#[async_trait]
impl BookRepository for MongoBookRepository {
    async fn insert(&self, book: Book) -> Result<Book, BookError> {
        let id = book.id;
        let document = BookDocument::from(book.clone());

        self.books.insert_one(&document, None).await.map_err(|e| {
            if is_duplicate_key(&e) {
                BookError::DuplicateId(id)
            } else {
                BookError::DatabaseError(e.to_string())
            }
        })?;

        Ok(book)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, BookError> {
        let document = self
            .books
            .find_one(doc! { "id": id }, None)
            .await
            .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        Ok(document.map(Book::from))
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        let cursor = self
            .books
            .find(doc! {}, None)
            .await
            .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        let documents: Vec<BookDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        Ok(documents.into_iter().map(Book::from).collect())
    }

    async fn update(&self, book: Book) -> Result<Book, BookError> {
        let result = self
            .books
            .update_one(
                doc! { "id": book.id },
                doc! { "$set": {
                    "title": &book.title,
                    "author": &book.author,
                    "category": &book.category,
                    "quantity": book.quantity,
                    "updated_at": DateTime::from_chrono(book.updated_at),
                }},
                None,
            )
            .await
            .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(BookError::NotFound(book.id));
        }

        Ok(book)
    }

    async fn delete(&self, id: i64) -> Result<(), BookError> {
        let result = self
            .books
            .delete_one(doc! { "id": id }, None)
            .await
            .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        if result.deleted_count == 0 {
            return Err(BookError::NotFound(id));
        }

        Ok(())
    }

    async fn decrement_quantity(&self, id: i64, quantity: i64) -> Result<(), BookError> {
        // Single conditional update: the filter only matches while the
        // remaining stock covers the decrement, so concurrent checkouts
        // cannot drive the quantity negative. Restocks (negative quantity)
        // have no floor to respect and match on id alone.
        let filter = if quantity > 0 {
            doc! { "id": id, "quantity": { "$gte": quantity } }
        } else {
            doc! { "id": id }
        };

        let result = self
            .books
            .update_one(
                filter,
                doc! {
                    "$inc": { "quantity": -quantity },
                    "$set": { "updated_at": DateTime::now() },
                },
                None,
            )
            .await
            .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        if result.matched_count == 0 {
            // Disambiguate: the filter misses both for an unknown book and
            // for one that exists with too little stock.
            return match self.find_by_id(id).await? {
                Some(_) => Err(BookError::InsufficientStock(id)),
                None => Err(BookError::NotFound(id)),
            };
        }

        Ok(())
    }
}
