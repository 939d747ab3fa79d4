use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use super::bearer_token;
use super::ApiError;
use super::BookData;
use crate::domain::book::models::UpdateBookCommand;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateBookRequestBody {
    title: Option<String>,
    author: Option<String>,
    category: Option<String>,
    quantity: Option<i64>,
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<UpdateBookRequestBody>,
) -> Result<Json<BookData>, ApiError> {
    state
        .guard
        .authorize_admin(bearer_token(&headers))
        .await?;

    let command = UpdateBookCommand {
        title: body.title,
        author: body.author,
        category: body.category,
        quantity: body.quantity,
    };

    let book = state.books.update_book(id, command).await?;

    Ok(Json(BookData::from(&book)))
}
