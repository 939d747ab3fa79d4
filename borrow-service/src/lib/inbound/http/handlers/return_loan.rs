use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use super::bearer_token;
use super::ApiError;
use super::LoanData;
use crate::inbound::http::router::AppState;

pub async fn return_loan(
    State(state): State<AppState>,
    Path(borrow_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<LoanData>, ApiError> {
    let caller = state.guard.authorize(bearer_token(&headers), None).await?;

    let loan = state
        .loans
        .return_loan(borrow_id, &caller.username, caller.role)
        .await?;

    Ok(Json(LoanData::from(&loan)))
}
