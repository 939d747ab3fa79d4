use axum::extract::State;
use axum::Json;

use super::ApiError;
use super::BookData;
use crate::inbound::http::router::AppState;

pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<BookData>>, ApiError> {
    let books = state.books.list_books().await?;

    Ok(Json(books.iter().map(BookData::from).collect()))
}
