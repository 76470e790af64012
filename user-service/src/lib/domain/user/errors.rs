use auth::AuthenticationError;
use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email is required")]
    Missing,

    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for registration, login and session resolution.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Caller input errors
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Domain-level errors
    #[error("User with this email already exists: {0}")]
    DuplicateUser(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Unauthenticated")]
    Unauthenticated,

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Password hashing error: {0}")]
    Hashing(String),

    #[error("Session token error: {0}")]
    Token(String),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::InputTooLong { .. } => AuthError::InvalidInput(err.to_string()),
            PasswordError::InvalidCost { .. }
            | PasswordError::HashingFailed(_)
            | PasswordError::VerificationFailed(_) => AuthError::Hashing(err.to_string()),
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        AuthError::Token(err.to_string())
    }
}

impl From<AuthenticationError> for AuthError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            AuthenticationError::PasswordError(e) => AuthError::Hashing(e.to_string()),
            AuthenticationError::JwtError(e) => e.into(),
        }
    }
}
