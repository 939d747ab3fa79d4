use std::sync::Arc;

use auth::Role;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Json;
use axum::Router;
use discovery::AuthClient;
use discovery::AuthzError;
use discovery::StaticLocator;
use serde_json::json;

/// Canned verifier: recognizes two tokens and rejects everything else,
/// answering with the real verify wire shape.
async fn verify(headers: HeaderMap) -> (StatusCode, Json<serde_json::Value>) {
    let raw = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    match auth::strip_bearer(raw) {
        "admin-token" => (
            StatusCode::OK,
            Json(json!({"valid": true, "username": "root", "role": "admin"})),
        ),
        "alice-token" => (
            StatusCode::OK,
            Json(json!({"valid": true, "username": "alice", "role": "user"})),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"valid": false, "error": "Token signature is invalid"})),
        ),
    }
}

async fn spawn_verifier() -> String {
    let app = Router::new().route("/auth/verify", post(verify));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind ephemeral port");
    let address = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Verifier crashed");
    });

    format!("http://{}", address)
}

fn client_for(verifier_url: String) -> AuthClient {
    let locator = Arc::new(StaticLocator::new().with_service("auth-service", verifier_url));
    AuthClient::new(locator, "auth-service").expect("Failed to build auth client")
}

#[tokio::test]
async fn test_authorize_valid_token() {
    let client = client_for(spawn_verifier().await);

    let verified = client
        .authorize("alice-token", None)
        .await
        .expect("Expected authorization to succeed");

    assert_eq!(verified.username, "alice");
    assert_eq!(verified.role, Role::User);
}

#[tokio::test]
async fn test_authorize_admin_with_user_token_is_forbidden() {
    let client = client_for(spawn_verifier().await);

    let result = client.authorize_admin("alice-token").await;
    assert_eq!(result, Err(AuthzError::Forbidden));
}

#[tokio::test]
async fn test_authorize_admin_with_admin_token() {
    let client = client_for(spawn_verifier().await);

    let verified = client
        .authorize_admin("admin-token")
        .await
        .expect("Expected admin authorization to succeed");

    assert_eq!(verified.username, "root");
    assert_eq!(verified.role, Role::Admin);
}

#[tokio::test]
async fn test_authorize_rejected_token() {
    let client = client_for(spawn_verifier().await);

    let result = client.authorize("forged-token", None).await;
    assert_eq!(result, Err(AuthzError::Unauthorized));
}

#[tokio::test]
async fn test_authorize_empty_token() {
    let client = client_for(spawn_verifier().await);

    let result = client.authorize("", None).await;
    assert_eq!(result, Err(AuthzError::Unauthorized));
}

#[tokio::test]
async fn test_verifier_unreachable_is_unauthorized_not_error() {
    // Nothing listens here; the transport failure must surface as a plain
    // rejection so the calling endpoint answers 401.
    let client = client_for("http://127.0.0.1:1".to_string());

    let result = client.authorize("alice-token", None).await;
    assert_eq!(result, Err(AuthzError::Unauthorized));
}
