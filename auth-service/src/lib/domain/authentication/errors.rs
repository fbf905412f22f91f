use thiserror::Error;

use crate::domain::session::errors::SessionError;
use crate::domain::user::errors::UserError;

/// Error for password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters")]
    TooShort { min: usize },

    #[error("Password too long: maximum {max} characters")]
    TooLong { max: usize },
}

/// Errors surfaced by authentication operations.
///
/// Messages stay vague: a caller cannot tell an unknown email
/// from a wrong password, or an expired token from a revoked session. The
/// specific cause is logged where it is detected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Unauthorized")]
    UserNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(_) => AuthError::EmailAlreadyRegistered,
            other => AuthError::Internal(other.to_string()),
        }
    }
}

impl From<SessionError> for AuthError {
    fn from(err: SessionError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
