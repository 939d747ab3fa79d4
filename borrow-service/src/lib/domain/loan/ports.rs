use async_trait::async_trait;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::loan::errors::LoanError;
use crate::domain::loan::models::BookSummary;
use crate::domain::loan::models::BorrowCommand;
use crate::domain::loan::models::Loan;

/// Port for loan orchestration.
#[async_trait]
pub trait LoanServicePort: Send + Sync + 'static {
    /// Reserve stock at the book service, then record the loan. The
    /// decrement is confirmed before the loan is persisted, so a recorded
    /// loan always corresponds to stock already removed.
    async fn borrow(&self, command: BorrowCommand) -> Result<Loan, LoanError>;

    /// Finish a loan. Only the borrower or an admin may return it. The
    /// restock is best-effort; the status transition proceeds regardless.
    async fn return_loan(
        &self,
        borrow_id: i64,
        requester: &str,
        role: Role,
    ) -> Result<Loan, LoanError>;

    /// Remove a loan record. Restocks first when the loan has not been
    /// returned. Caller is responsible for the admin check.
    async fn delete_loan(&self, borrow_id: i64) -> Result<(), LoanError>;

    /// Admins see every loan, ordinary users only their own.
    async fn list_loans(&self, requester: &str, role: Role) -> Result<Vec<Loan>, LoanError>;

    /// Same scoping as `list_loans`, filtered to unreturned loans.
    async fn active_loans(&self, requester: &str, role: Role) -> Result<Vec<Loan>, LoanError>;

    /// Every loan, newest first. Caller is responsible for the admin check.
    async fn loan_history(&self) -> Result<Vec<Loan>, LoanError>;
}

/// Persistence operations for loan records.
#[async_trait]
pub trait LoanRepository: Send + Sync + 'static {
    /// Next value of the monotonic borrow-id sequence. Atomic across
    /// concurrent borrows.
    async fn next_borrow_id(&self) -> Result<i64, LoanError>;

    async fn insert(&self, loan: Loan) -> Result<Loan, LoanError>;

    async fn find_by_id(&self, borrow_id: i64) -> Result<Option<Loan>, LoanError>;

    async fn list_all(&self) -> Result<Vec<Loan>, LoanError>;

    async fn list_by_username(&self, username: &str) -> Result<Vec<Loan>, LoanError>;

    async fn mark_returned(
        &self,
        borrow_id: i64,
        returned_at: DateTime<Utc>,
    ) -> Result<(), LoanError>;

    async fn delete(&self, borrow_id: i64) -> Result<(), LoanError>;
}

/// Outbound port to the book-inventory service.
#[async_trait]
pub trait BookInventory: Send + Sync + 'static {
    async fn fetch(&self, book_id: i64) -> Result<BookSummary, LoanError>;

    /// Remove stock. The inventory side performs the decrement as one
    /// atomic conditional operation and answers `InsufficientStock` when
    /// the request does not fit.
    async fn withdraw(&self, book_id: i64, quantity: i64) -> Result<(), LoanError>;

    /// Put stock back.
    async fn restock(&self, book_id: i64, quantity: i64) -> Result<(), LoanError>;
}
