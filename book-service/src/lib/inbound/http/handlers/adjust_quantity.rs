use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::ApiError;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct AdjustQuantityRequestBody {
    quantity: Option<i64>,
}

/// Internal stock adjustment used by the loan coordinator. A positive
/// quantity removes stock, a negative quantity restocks.
pub async fn adjust_quantity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<AdjustQuantityRequestBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let quantity = body
        .quantity
        .ok_or_else(|| ApiError::BadRequest("Missing required field: quantity".to_string()))?;

    state.books.adjust_quantity(id, quantity).await?;

    Ok(Json(json!({ "message": "Quantity updated" })))
}
