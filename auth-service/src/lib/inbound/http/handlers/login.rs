use auth::Role;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub username: String,
    pub role: Role,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<Json<LoginResponseData>, ApiError> {
    let outcome = state.accounts.login(&body.username, &body.password).await?;

    Ok(Json(LoginResponseData {
        token: outcome.token,
        username: outcome.username,
        role: outcome.role,
    }))
}
