use auth::Role;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::inbound::http::router::AppState;

/// Wire shape consumed by every downstream service's authorization guard.
#[derive(Debug, Serialize)]
pub struct VerifyResponseData {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Stateless credential verification.
///
/// Pure function of the presented token and the shared secret; no store is
/// consulted. The token may arrive `Bearer`-prefixed or raw.
pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (StatusCode, Json<VerifyResponseData>) {
    let raw = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let token = auth::strip_bearer(raw);

    match state.authenticator.verify_token(token) {
        Ok(subject) => (
            StatusCode::OK,
            Json(VerifyResponseData {
                valid: true,
                username: Some(subject.username),
                role: Some(subject.role),
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::UNAUTHORIZED,
            Json(VerifyResponseData {
                valid: false,
                username: None,
                role: None,
                error: Some(e.to_string()),
            }),
        ),
    }
}
