use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenType;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Default access token lifetime (15 minutes).
pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 60 * 15;

/// Default refresh token lifetime (7 days).
pub const REFRESH_TOKEN_TTL_SECONDS: i64 = 60 * 60 * 24 * 7;

/// Authentication coordinator combining password hashing and token issuance.
///
/// Access and refresh tokens are signed with distinct secrets, so a leaked
/// access-signing key cannot mint refresh tokens and vice versa.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    access_handler: JwtHandler,
    refresh_handler: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

/// Freshly issued access/refresh pair bound to one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Absolute expiry embedded in the refresh token.
    pub refresh_expires_at: DateTime<Utc>,
}

impl Authenticator {
    /// Create a new authenticator with the default lifetimes.
    ///
    /// # Arguments
    /// * `access_secret` - Secret key for access token signing
    /// * `refresh_secret` - Secret key for refresh token signing
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            access_handler: JwtHandler::new(access_secret),
            refresh_handler: JwtHandler::new(refresh_secret),
            access_ttl: Duration::seconds(ACCESS_TOKEN_TTL_SECONDS),
            refresh_ttl: Duration::seconds(REFRESH_TOKEN_TTL_SECONDS),
        }
    }

    /// Override token lifetimes (in seconds).
    pub fn with_ttls(mut self, access_ttl_seconds: i64, refresh_ttl_seconds: i64) -> Self {
        self.access_ttl = Duration::seconds(access_ttl_seconds);
        self.refresh_ttl = Duration::seconds(refresh_ttl_seconds);
        self
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue an access/refresh pair for a user session.
    ///
    /// # Arguments
    /// * `subject` - User identifier (`sub`)
    /// * `session` - Session identifier (`sid`)
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_tokens(
        &self,
        subject: impl ToString,
        session: impl ToString,
    ) -> Result<TokenPair, JwtError> {
        let now = Utc::now();
        let subject = subject.to_string();
        let session = session.to_string();

        let access_claims = Claims::new(
            &subject,
            &session,
            TokenType::Access,
            now,
            now + self.access_ttl,
        );
        let refresh_expires_at = now + self.refresh_ttl;
        let refresh_claims = Claims::new(
            &subject,
            &session,
            TokenType::Refresh,
            now,
            refresh_expires_at,
        );

        Ok(TokenPair {
            access_token: self.access_handler.encode(&access_claims)?,
            refresh_token: self.refresh_handler.encode(&refresh_claims)?,
            refresh_expires_at,
        })
    }

    /// Verify an access token (signature, expiry, `typ == access`).
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.access_handler.decode(token, TokenType::Access)
    }

    /// Verify a refresh token (signature, expiry, `typ == refresh`).
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.refresh_handler.decode(token, TokenType::Refresh)
    }
}
