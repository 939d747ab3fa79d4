use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use super::bearer_token;
use super::ApiError;
use super::LoanData;
use crate::inbound::http::router::AppState;

pub async fn loan_history(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<LoanData>>, ApiError> {
    state
        .guard
        .authorize_admin(bearer_token(&headers))
        .await?;

    let loans = state.loans.loan_history().await?;

    Ok(Json(loans.iter().map(LoanData::from).collect()))
}
