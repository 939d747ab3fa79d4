use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::verify::verify;
use crate::domain::account::ports::AuthServicePort;

#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AuthServicePort>,
    pub authenticator: Arc<Authenticator>,
}

/// Liveness probe consumed by the registry's health check.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "UP" }))
}

pub fn create_router(accounts: Arc<dyn AuthServicePort>, authenticator: Arc<Authenticator>) -> Router {
    let state = AppState {
        accounts,
        authenticator,
    };

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
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/auth/verify", post(verify))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
