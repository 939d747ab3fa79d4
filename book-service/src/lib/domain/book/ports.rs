use async_trait::async_trait;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::UpdateBookCommand;

/// Port for book domain operations.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    async fn list_books(&self) -> Result<Vec<Book>, BookError>;

    async fn get_book(&self, id: i64) -> Result<Book, BookError>;

    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError>;

    async fn update_book(&self, id: i64, command: UpdateBookCommand) -> Result<Book, BookError>;

    async fn delete_book(&self, id: i64) -> Result<(), BookError>;

    /// Adjust available stock. A positive quantity removes stock (a
    /// checkout), a negative quantity restocks (a return).
    ///
    /// # Errors
    /// * `NotFound` - No such book
    /// * `InsufficientStock` - Removal would drive the quantity negative
    async fn adjust_quantity(&self, id: i64, quantity: i64) -> Result<(), BookError>;
}

/// Persistence operations for the book aggregate.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    async fn insert(&self, book: Book) -> Result<Book, BookError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, BookError>;

    async fn list_all(&self) -> Result<Vec<Book>, BookError>;

    async fn update(&self, book: Book) -> Result<Book, BookError>;

    async fn delete(&self, id: i64) -> Result<(), BookError>;

    /// Subtract `quantity` from the stored stock as one atomic conditional
    /// operation: the subtraction happens only if the remaining quantity
    /// stays non-negative. Concurrent checkouts race here and exactly the
    /// ones that fit the stock succeed.
    async fn decrement_quantity(&self, id: i64, quantity: i64) -> Result<(), BookError>;
}
