use axum::extract::Path;
use axum::extract::State;
use axum::Json;

use super::ApiError;
use super::BookData;
use crate::inbound::http::router::AppState;

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BookData>, ApiError> {
    let book = state.books.get_book(id).await?;

    Ok(Json(BookData::from(&book)))
}
