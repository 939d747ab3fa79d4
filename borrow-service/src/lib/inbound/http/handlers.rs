use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use discovery::AuthzError;
use serde::Serialize;
use serde_json::json;

use crate::domain::loan::errors::LoanError;
use crate::domain::loan::models::Loan;
use crate::domain::loan::models::LoanStatus;

pub mod active_loans;
pub mod borrow_book;
pub mod delete_loan;
pub mod list_loans;
pub mod loan_history;
pub mod return_loan;

/// Extract the caller's token from the Authorization header, tolerating
/// both `Bearer <token>` and raw presentations.
pub fn bearer_token(headers: &HeaderMap) -> &str {
    let raw = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    auth::strip_bearer(raw)
}

/// HTTP-level rejection, serialized as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    BadGateway(String),
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<LoanError> for ApiError {
    fn from(err: LoanError) -> Self {
        match err {
            LoanError::InvalidQuantity(_) => ApiError::BadRequest(err.to_string()),
            LoanError::BookNotFound(_) => ApiError::NotFound(err.to_string()),
            LoanError::LoanNotFound(_) => ApiError::NotFound(err.to_string()),
            LoanError::InsufficientStock(_) => ApiError::Conflict(err.to_string()),
            LoanError::AlreadyReturned(_) => ApiError::Conflict(err.to_string()),
            LoanError::Forbidden => ApiError::Forbidden(err.to_string()),
            LoanError::InventoryUpdateFailed(_) => ApiError::BadGateway(err.to_string()),
            LoanError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::Unauthorized => ApiError::Unauthorized(err.to_string()),
            AuthzError::Forbidden => ApiError::Forbidden(err.to_string()),
        }
    }
}

/// Wire representation of a loan.
#[derive(Debug, Clone, Serialize)]
pub struct LoanData {
    pub borrow_id: i64,
    pub username: String,
    pub book_id: i64,
    pub book_title: String,
    pub quantity: i64,
    pub days: i64,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub status: LoanStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_return_date: Option<DateTime<Utc>>,
}

impl From<&Loan> for LoanData {
    fn from(loan: &Loan) -> Self {
        Self {
            borrow_id: loan.borrow_id,
            username: loan.username.clone(),
            book_id: loan.book_id,
            book_title: loan.book_title.clone(),
            quantity: loan.quantity,
            days: loan.days,
            borrow_date: loan.borrow_date,
            due_date: loan.due_date,
            status: loan.status,
            actual_return_date: loan.actual_return_date,
        }
    }
}
