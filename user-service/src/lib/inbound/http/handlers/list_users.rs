use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use super::bearer_token;
use super::ApiError;
use super::UserData;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<UserData>>, ApiError> {
    state
        .guard
        .authorize_admin(bearer_token(&headers))
        .await?;

    let accounts = state.users.list_users().await?;

    Ok(Json(accounts.iter().map(UserData::from).collect()))
}
