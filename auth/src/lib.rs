//! Authentication utilities library
//!
//! Provides the stateless building blocks of session authentication:
//! - Password hashing (Argon2id)
//! - Typed access/refresh JWT generation and validation
//! - Refresh token digests for server-side storage
//!
//! Persistence of users and sessions is left to the service using this crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Token Pairs
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(
//!     b"access_secret_at_least_32_bytes_long",
//!     b"refresh_secret_at_least_32_bytes_long",
//! );
//! let pair = auth.issue_tokens("user123", "session456").unwrap();
//!
//! let claims = auth.validate_refresh_token(&pair.refresh_token).unwrap();
//! assert_eq!(claims.sid, "session456");
//! assert!(auth.validate_access_token(&pair.refresh_token).is_err());
//! ```

pub mod authenticator;
pub mod digest;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use authenticator::ACCESS_TOKEN_TTL_SECONDS;
pub use authenticator::REFRESH_TOKEN_TTL_SECONDS;
pub use digest::hash_refresh_token;
pub use digest::refresh_token_matches;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenType;
pub use password::PasswordError;
pub use password::PasswordHasher;
