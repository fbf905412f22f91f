use thiserror::Error;

/// Error for SessionId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for session store operations
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
