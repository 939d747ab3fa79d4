use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use super::bearer_token;
use super::ApiError;
use super::UserData;
use crate::inbound::http::router::AppState;

pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Result<Json<UserData>, ApiError> {
    state
        .guard
        .authorize_admin(bearer_token(&headers))
        .await?;

    let account = state.users.get_user(&username).await?;

    Ok(Json(UserData::from(&account)))
}
