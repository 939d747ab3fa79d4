pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use claims::Role;
pub use claims::Subject;
pub use errors::TokenError;
pub use handler::TokenHandler;

/// Normalize a presented token by removing an optional `Bearer ` prefix.
///
/// Callers present tokens either as `Bearer <token>` or as the raw token.
/// This is the single place that tolerance lives; everything downstream
/// works on the normalized form.
pub fn strip_bearer(raw: &str) -> &str {
    raw.strip_prefix("Bearer ").unwrap_or(raw).trim()
}
