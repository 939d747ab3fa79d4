use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::bearer_token;
use super::ApiError;
use super::LoanData;
use crate::domain::loan::models::BorrowCommand;
use crate::inbound::http::router::AppState;

const DEFAULT_LOAN_DAYS: i64 = 14;

/// Fields are optional at the wire level so absence maps to an explicit
/// rejection instead of a generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct BorrowRequestBody {
    book_id: Option<i64>,
    quantity: Option<i64>,
    days: Option<i64>,
}

pub async fn borrow_book(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<BorrowRequestBody>,
) -> Result<(StatusCode, Json<LoanData>), ApiError> {
    let caller = state.guard.authorize(bearer_token(&headers), None).await?;

    let command = BorrowCommand {
        username: caller.username,
        book_id: body
            .book_id
            .ok_or_else(|| ApiError::BadRequest("Missing required field: book_id".to_string()))?,
        quantity: body
            .quantity
            .ok_or_else(|| ApiError::BadRequest("Missing required field: quantity".to_string()))?,
        days: body.days.unwrap_or(DEFAULT_LOAN_DAYS),
    };

    let loan = state.loans.borrow(command).await?;

    Ok((StatusCode::CREATED, Json(LoanData::from(&loan))))
}
