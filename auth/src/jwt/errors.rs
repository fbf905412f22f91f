use thiserror::Error;

use super::claims::TokenType;

/// Error type for JWT operations.
///
/// Verification failures stay distinguishable here so callers can log the
/// cause; anything user-facing should collapse them into one message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token type mismatch: expected {expected}, got {actual}")]
    WrongTokenType {
        expected: TokenType,
        actual: TokenType,
    },
}
