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
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for the auth flows.
///
/// Every failure is terminal for the request; nothing is retried internally.
/// Expired and tampered tokens are deliberately not distinguishable: both
/// surface as `InvalidToken`.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("User with this email was found in the system")]
    DuplicateAccount,

    #[error("User not found")]
    NotFound,

    #[error("User banned. Contact the administrator")]
    AccountBanned,

    #[error("Invalid password")]
    InvalidCredentials,

    #[error("Please sign in")]
    MissingToken,

    #[error("Invalid token or expired")]
    InvalidToken,

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Unknown(err.to_string())
    }
}
