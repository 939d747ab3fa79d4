use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::json;

use super::bearer_token;
use super::ApiError;
use crate::inbound::http::router::AppState;

pub async fn delete_loan(
    State(state): State<AppState>,
    Path(borrow_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .guard
        .authorize_admin(bearer_token(&headers))
        .await?;

    state.loans.delete_loan(borrow_id).await?;

    Ok(Json(json!({ "message": "Borrow record deleted" })))
}
