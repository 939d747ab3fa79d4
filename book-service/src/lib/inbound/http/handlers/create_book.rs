use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::bearer_token;
use super::ApiError;
use super::BookData;
use crate::domain::book::models::CreateBookCommand;
use crate::inbound::http::router::AppState;

/// Fields are optional at the wire level so absence maps to an explicit
/// rejection instead of a generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateBookRequestBody {
    id: Option<i64>,
    title: Option<String>,
    author: Option<String>,
    category: Option<String>,
    quantity: Option<i64>,
}

pub async fn create_book(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateBookRequestBody>,
) -> Result<(StatusCode, Json<BookData>), ApiError> {
    state
        .guard
        .authorize_admin(bearer_token(&headers))
        .await?;

    let command = CreateBookCommand {
        id: body
            .id
            .ok_or_else(|| ApiError::BadRequest("Missing required field: id".to_string()))?,
        title: body
            .title
            .ok_or_else(|| ApiError::BadRequest("Missing required field: title".to_string()))?,
        author: body
            .author
            .ok_or_else(|| ApiError::BadRequest("Missing required field: author".to_string()))?,
        category: body.category.unwrap_or_default(),
        quantity: body
            .quantity
            .ok_or_else(|| ApiError::BadRequest("Missing required field: quantity".to_string()))?,
    };

    let book = state.books.create_book(command).await?;

    Ok((StatusCode::CREATED, Json(BookData::from(&book))))
}
