use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Purpose a token was minted for.
///
/// Serialized into the `typ` claim so a token issued for one use cannot be
/// replayed as the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Access => f.write_str("access"),
            TokenType::Refresh => f.write_str("refresh"),
        }
    }
}

/// JWT payload for access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Session identifier the token is bound to
    pub sid: String,

    /// Token purpose
    pub typ: TokenType,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Unique token identifier, keeps two tokens minted in the same second distinct
    pub jti: String,
}

impl Claims {
    /// Create claims for a user session.
    ///
    /// # Arguments
    /// * `subject` - User identifier
    /// * `session` - Session identifier
    /// * `typ` - Token purpose
    /// * `issued_at` - Issue instant
    /// * `expires_at` - Absolute expiry
    pub fn new(
        subject: impl ToString,
        session: impl ToString,
        typ: TokenType,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            sid: session.to_string(),
            typ,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}
