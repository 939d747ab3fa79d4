use std::sync::Arc;

use async_trait::async_trait;
use auth::Role;
use chrono::Duration;
use chrono::Utc;

use crate::domain::loan::errors::LoanError;
use crate::domain::loan::models::BorrowCommand;
use crate::domain::loan::models::Loan;
use crate::domain::loan::models::LoanStatus;
use crate::domain::loan::ports::BookInventory;
use crate::domain::loan::ports::LoanRepository;
use crate::domain::loan::ports::LoanServicePort;

/// Coordinates loan records with the remote book inventory.
pub struct LoanService<R, I>
where
    R: LoanRepository,
    I: BookInventory,
{
    loans: Arc<R>,
    inventory: Arc<I>,
}

impl<R, I> LoanService<R, I>
where
    R: LoanRepository,
    I: BookInventory,
{
    pub fn new(loans: Arc<R>, inventory: Arc<I>) -> Self {
        Self { loans, inventory }
    }

    /// Restock without failing the surrounding operation. The loan record
    /// stays truthful even when the stock count drifts; the drift is logged
    /// for out-of-band reconciliation.
    async fn restock_best_effort(&self, loan: &Loan) {
        if let Err(e) = self.inventory.restock(loan.book_id, loan.quantity).await {
            tracing::warn!(
                borrow_id = loan.borrow_id,
                book_id = loan.book_id,
                quantity = loan.quantity,
                error = %e,
                "Compensating restock failed; stock count has drifted"
            );
        }
    }
}

#[async_trait]
impl<R, I> LoanServicePort for LoanService<R, I>
where
    R: LoanRepository,
    I: BookInventory,
{
    async fn borrow(&self, command: BorrowCommand) -> Result<Loan, LoanError> {
        if command.quantity <= 0 {
            return Err(LoanError::InvalidQuantity(command.quantity));
        }

        let book = self.inventory.fetch(command.book_id).await?;
        if command.quantity > book.quantity {
            return Err(LoanError::InsufficientStock(command.book_id));
        }

        // The withdraw must be confirmed before the loan exists. Concurrent
        // borrows race at the inventory store, and only the winners get here.
        self.inventory
            .withdraw(command.book_id, command.quantity)
            .await?;

        let now = Utc::now();
        let loan = Loan {
            borrow_id: self.loans.next_borrow_id().await?,
            username: command.username,
            book_id: command.book_id,
            book_title: book.title,
            quantity: command.quantity,
            days: command.days,
            borrow_date: now,
            due_date: now + Duration::days(command.days),
            status: LoanStatus::Borrowing,
            actual_return_date: None,
        };

        match self.loans.insert(loan).await {
            Ok(loan) => Ok(loan),
            Err(e) => {
                // Stock was already removed; put it back before reporting
                // the failure.
                if let Err(restock_error) = self
                    .inventory
                    .restock(command.book_id, command.quantity)
                    .await
                {
                    tracing::warn!(
                        book_id = command.book_id,
                        quantity = command.quantity,
                        error = %restock_error,
                        "Restock after failed loan insert did not go through"
                    );
                }
                Err(e)
            }
        }
    }

    async fn return_loan(
        &self,
        borrow_id: i64,
        requester: &str,
        role: Role,
    ) -> Result<Loan, LoanError> {
        let loan = self
            .loans
            .find_by_id(borrow_id)
            .await?
            .ok_or(LoanError::LoanNotFound(borrow_id))?;

        if loan.username != requester && !role.is_admin() {
            return Err(LoanError::Forbidden);
        }

        if loan.status == LoanStatus::Returned {
            return Err(LoanError::AlreadyReturned(borrow_id));
        }

        self.restock_best_effort(&loan).await;

        let returned_at = Utc::now();
        self.loans.mark_returned(borrow_id, returned_at).await?;

        Ok(Loan {
            status: LoanStatus::Returned,
            actual_return_date: Some(returned_at),
            ..loan
        })
    }

    async fn delete_loan(&self, borrow_id: i64) -> Result<(), LoanError> {
        let loan = self
            .loans
            .find_by_id(borrow_id)
            .await?
            .ok_or(LoanError::LoanNotFound(borrow_id))?;

        // A deleted unreturned loan releases its stock; the removal itself
        // happens regardless of the restock outcome.
        if loan.status != LoanStatus::Returned {
            self.restock_best_effort(&loan).await;
        }

        self.loans.delete(borrow_id).await
    }

    async fn list_loans(&self, requester: &str, role: Role) -> Result<Vec<Loan>, LoanError> {
        if role.is_admin() {
            self.loans.list_all().await
        } else {
            self.loans.list_by_username(requester).await
        }
    }

    async fn active_loans(&self, requester: &str, role: Role) -> Result<Vec<Loan>, LoanError> {
        let loans = self.list_loans(requester, role).await?;

        Ok(loans
            .into_iter()
            .filter(|loan| loan.status != LoanStatus::Returned)
            .collect())
    }

    async fn loan_history(&self) -> Result<Vec<Loan>, LoanError> {
        let mut loans = self.loans.list_all().await?;
        loans.sort_by(|a, b| b.borrow_date.cmp(&a.borrow_date));

        Ok(loans)
    }
}
