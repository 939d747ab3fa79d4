use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::Json;
use axum::Router;
use discovery::AuthClient;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_user::create_user;
use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_user;
use super::handlers::list_users::list_users;
use super::handlers::update_user::update_user;
use crate::domain::account::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserServicePort>,
    pub guard: Arc<AuthClient>,
}

/// Liveness probe consumed by the registry's health check.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "UP" }))
}

pub fn create_router(users: Arc<dyn UserServicePort>, guard: Arc<AuthClient>) -> Router {
    let state = AppState { users, guard };

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
        .route("/user-api/users", get(list_users).post(create_user))
        .route(
            "/user-api/users/:username",
            get(get_user).put(update_user).delete(delete_user),
        )
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
