use thiserror::Error;

use super::models::AppId;

/// Failures reported by credential store implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("User already exists: {0}")]
    UserExists(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("App not found: {0}")]
    AppNotFound(AppId),

    #[error("Database error: {0}")]
    Database(String),
}

/// Errors returned by the auth engine.
///
/// Storage and crypto failures never cross this boundary as-is; everything
/// that is not a credential or uniqueness failure is `Internal`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password. The two cases are indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserExists,

    #[error("Internal error: {0}")]
    Internal(String),
}
