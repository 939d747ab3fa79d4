use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use super::bearer_token;
use super::ApiError;
use super::LoanData;
use crate::inbound::http::router::AppState;

pub async fn list_loans(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<LoanData>>, ApiError> {
    let caller = state.guard.authorize(bearer_token(&headers), None).await?;

    let loans = state
        .loans
        .list_loans(&caller.username, caller.role)
        .await?;

    Ok(Json(loans.iter().map(LoanData::from).collect()))
}
