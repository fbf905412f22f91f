use auth::TokenPair;

use crate::domain::authentication::errors::PasswordPolicyError;
use crate::domain::session::models::SessionId;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PublicUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Plaintext password accepted at the API boundary.
///
/// 8-72 characters. Never stored, never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 72;

    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    /// * `TooLong` - More than 72 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new account with validated fields
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub name: DisplayName,
    pub password: Password,
}

impl RegisterCommand {
    pub fn new(email: EmailAddress, name: DisplayName, password: Password) -> Self {
        Self {
            email,
            name,
            password,
        }
    }
}

/// Command to open a new session with email and password
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: Password,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: Password) -> Self {
        Self { email, password }
    }
}

/// Outcome of register, login and refresh: the user plus a token pair bound
/// to one session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: PublicUser,
    pub session_id: SessionId,
    pub tokens: TokenPair,
}

/// Identity resolved from a valid access token and a live session.
///
/// Handed to protected handlers explicitly through request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub session_id: SessionId,
    pub email: String,
    pub name: String,
}

impl Identity {
    pub fn new(user: &User, session_id: SessionId) -> Self {
        Self {
            user_id: user.id,
            session_id,
            email: user.email.as_str().to_string(),
            name: user.name.as_str().to_string(),
        }
    }
}
