use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoanError {
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    #[error("Book with id {0} not found")]
    BookNotFound(i64),

    #[error("Loan with id {0} not found")]
    LoanNotFound(i64),

    #[error("Not enough stock for book {0}")]
    InsufficientStock(i64),

    #[error("Loan {0} has already been returned")]
    AlreadyReturned(i64),

    #[error("Only the borrower or an admin may act on this loan")]
    Forbidden,

    #[error("Inventory update failed: {0}")]
    InventoryUpdateFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
