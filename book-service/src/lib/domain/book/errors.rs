use thiserror::Error;

/// Top-level error for book operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookError {
    #[error("Book not found: {0}")]
    NotFound(i64),

    #[error("Book id already exists: {0}")]
    DuplicateId(i64),

    #[error("Insufficient stock for book {0}")]
    InsufficientStock(i64),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
