use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Lifecycle of a loan: created as `Borrowing`, finished as `Returned`.
/// Admin deletion removes the record instead of transitioning it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Borrowing,
    Returned,
}

/// A borrow record. While `status` is `Borrowing` the quantity is logically
/// checked out of the book's stock; whoever removes or finishes the loan is
/// responsible for putting that stock back.
#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    pub borrow_id: i64,
    pub username: String,
    pub book_id: i64,
    /// Denormalized at borrow time for display; not refreshed afterwards.
    pub book_title: String,
    pub quantity: i64,
    pub days: i64,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub status: LoanStatus,
    pub actual_return_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct BorrowCommand {
    pub username: String,
    pub book_id: i64,
    pub quantity: i64,
    pub days: i64,
}

/// Inventory-side view of a book, as fetched from the book service.
#[derive(Debug, Clone, Deserialize)]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
    pub quantity: i64,
}
