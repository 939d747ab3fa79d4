use auth::Role;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::bearer_token;
use super::ApiError;
use super::UserData;
use crate::domain::account::models::CreateUserCommand;
use crate::inbound::http::router::AppState;

/// Fields are optional at the wire level so absence maps to an explicit
/// rejection instead of a generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequestBody {
    username: Option<String>,
    password: Option<String>,
    name: Option<String>,
    age: Option<i64>,
    address: Option<String>,
    role: Option<Role>,
}

pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateUserRequestBody>,
) -> Result<(StatusCode, Json<UserData>), ApiError> {
    state
        .guard
        .authorize_admin(bearer_token(&headers))
        .await?;

    let command = CreateUserCommand {
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
        role: body.role,
    };

    let account = state.users.create_user(command).await?;

    Ok((StatusCode::CREATED, Json(UserData::from(&account))))
}
