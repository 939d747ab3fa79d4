use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::json;

use super::bearer_token;
use super::ApiError;
use crate::inbound::http::router::AppState;

pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .guard
        .authorize_admin(bearer_token(&headers))
        .await?;

    state.users.delete_user(&username).await?;

    Ok(Json(json!({ "message": "User deleted" })))
}
