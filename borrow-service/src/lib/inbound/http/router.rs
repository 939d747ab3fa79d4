use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Json;
use axum::Router;
use discovery::AuthClient;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::active_loans::active_loans;
use super::handlers::borrow_book::borrow_book;
use super::handlers::delete_loan::delete_loan;
use super::handlers::list_loans::list_loans;
use super::handlers::loan_history::loan_history;
use super::handlers::return_loan::return_loan;
use crate::domain::loan::ports::LoanServicePort;

#[derive(Clone)]
pub struct AppState {
    pub loans: Arc<dyn LoanServicePort>,
    pub guard: Arc<AuthClient>,
}

/// Liveness probe consumed by the registry's health check.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "UP" }))
}

pub fn create_router(loans: Arc<dyn LoanServicePort>, guard: Arc<AuthClient>) -> Router {
    let state = AppState { loans, guard };

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
        .route("/borrow-api/list", get(list_loans))
        .route("/borrow-api/active", get(active_loans))
        .route("/borrow-api/history", get(loan_history))
        .route("/borrow-api/borrow", post(borrow_book))
        .route("/borrow-api/return/:id", post(return_loan))
        .route("/borrow-api/:id", delete(delete_loan))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
