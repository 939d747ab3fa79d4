use auth::Role;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use super::bearer_token;
use super::ApiError;
use super::UserData;
use crate::domain::account::models::UpdateUserCommand;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequestBody {
    password: Option<String>,
    name: Option<String>,
    age: Option<i64>,
    address: Option<String>,
    role: Option<Role>,
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    headers: HeaderMap,
    Json(body): Json<UpdateUserRequestBody>,
) -> Result<Json<UserData>, ApiError> {
    state
        .guard
        .authorize_admin(bearer_token(&headers))
        .await?;

    let command = UpdateUserCommand {
        password: body.password,
        name: body.name,
        age: body.age,
        address: body.address,
        role: body.role,
    };

    let account = state.users.update_user(&username, command).await?;

    Ok(Json(UserData::from(&account)))
}
