use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("User {0} not found")]
    NotFound(String),

    #[error("Username {0} already taken")]
    DuplicateUsername(String),

    #[error("Password processing failed")]
    Password,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
