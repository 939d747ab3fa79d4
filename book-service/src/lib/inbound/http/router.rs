use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Json;
use axum::Router;
use discovery::AuthClient;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::adjust_quantity::adjust_quantity;
use super::handlers::create_book::create_book;
use super::handlers::delete_book::delete_book;
use super::handlers::get_book::get_book;
use super::handlers::list_books::list_books;
use super::handlers::update_book::update_book;
use crate::domain::book::ports::BookServicePort;

#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookServicePort>,
    pub guard: Arc<AuthClient>,
}

/// Liveness probe consumed by the registry's health check.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "UP" }))
}

pub fn create_router(books: Arc<dyn BookServicePort>, guard: Arc<AuthClient>) -> Router {
    let state = AppState { books, guard };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/health", get(health))
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/books/:id/decrease", post(adjust_quantity))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
