use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::UpdateBookCommand;
use crate::domain::book::ports::BookRepository;
use crate::domain::book::ports::BookServicePort;

/// Domain service for the book inventory.
pub struct BookService<R>
where
    R: BookRepository,
{
    repository: Arc<R>,
}

impl<R> BookService<R>
where
    R: BookRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> BookServicePort for BookService<R>
where
    R: BookRepository,
{
    async fn list_books(&self) -> Result<Vec<Book>, BookError> {
        self.repository.list_all().await
    }

    async fn get_book(&self, id: i64) -> Result<Book, BookError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(id))
    }

    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError> {
        if command.quantity < 0 {
            return Err(BookError::InvalidQuantity(command.quantity));
        }

        let now = Utc::now();
        let book = Book {
            id: command.id,
            title: command.title,
            author: command.author,
            category: command.category,
            quantity: command.quantity,
            created_at: now,
            updated_at: now,
        };

        self.repository.insert(book).await
    }

    async fn update_book(&self, id: i64, command: UpdateBookCommand) -> Result<Book, BookError> {
        let mut book = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(id))?;

        if let Some(title) = command.title {
            book.title = title;
        }
        if let Some(author) = command.author {
            book.author = author;
        }
        if let Some(category) = command.category {
            book.category = category;
        }
        if let Some(quantity) = command.quantity {
            if quantity < 0 {
                return Err(BookError::InvalidQuantity(quantity));
            }
            book.quantity = quantity;
        }
        book.updated_at = Utc::now();

        self.repository.update(book).await
    }

    async fn delete_book(&self, id: i64) -> Result<(), BookError> {
        self.repository.delete(id).await
    }

    async fn adjust_quantity(&self, id: i64, quantity: i64) -> Result<(), BookError> {
        // Positive removes stock, negative restocks; both go through the
        // same conditional decrement so removal can never oversell.
        self.repository.decrement_quantity(id, quantity).await
    }
}
