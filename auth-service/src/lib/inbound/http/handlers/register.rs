use auth::Role;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::account::models::RegisterCommand;
use crate::inbound::http::router::AppState;

/// Fields are optional at the wire level so absence maps to an explicit
/// `MissingField` rejection instead of a generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct RegisterRequestBody {
    username: Option<String>,
    password: Option<String>,
    name: Option<String>,
    age: Option<i64>,
    address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponseData {
    pub username: String,
    pub name: String,
    pub age: i64,
    pub address: String,
    pub role: Role,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<(StatusCode, Json<RegisterResponseData>), ApiError> {
    let command = RegisterCommand {
        username: body
            .username
            .ok_or_else(|| ApiError::BadRequest("Missing required field: username".to_string()))?,
        password: body
            .password
            .ok_or_else(|| ApiError::BadRequest("Missing required field: password".to_string()))?,
        name: body
            .name
            .ok_or_else(|| ApiError::BadRequest("Missing required field: name".to_string()))?,
        age: body
            .age
            .ok_or_else(|| ApiError::BadRequest("Missing required field: age".to_string()))?,
        address: body.address.unwrap_or_default(),
    };

    let account = state.accounts.register(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponseData {
            username: account.username,
            name: account.name,
            age: account.age,
            address: account.address,
            role: account.role,
        }),
    ))
}
