use async_trait::async_trait;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AuthSession;
use crate::domain::authentication::models::Identity;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::RegisterCommand;
use crate::domain::session::models::SessionId;
use crate::domain::user::models::PublicUser;
use crate::domain::user::models::UserId;

/// Port for session-based authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Create an account and open its first session.
    ///
    /// # Errors
    /// * `EmailAlreadyRegistered` - Normalized email is taken
    /// * `Internal` - Hashing, signing or storage failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError>;

    /// Open an additional session for existing credentials.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `Internal` - Signing or storage failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError>;

    /// Exchange a refresh token for a new pair under the same session,
    /// invalidating the presented token.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Bad signature, wrong type, expired, session
    ///   gone/revoked/expired, or token already rotated
    /// * `Internal` - Signing or storage failed
    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError>;

    /// Resolve an access token into an identity, re-checking session liveness.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid or session no longer active
    /// * `Internal` - Storage failed
    async fn authenticate(&self, access_token: &str) -> Result<Identity, AuthError>;

    /// Revoke exactly one session.
    ///
    /// # Errors
    /// * `Internal` - Storage failed
    async fn logout_session(
        &self,
        user_id: &UserId,
        session_id: &SessionId,
    ) -> Result<(), AuthError>;

    /// Revoke every session of a user ("sign out everywhere").
    ///
    /// # Errors
    /// * `UserNotFound` - User no longer exists
    /// * `Internal` - Storage failed
    async fn revoke_all(&self, user_id: &UserId) -> Result<(), AuthError>;

    /// Public view of the user behind an identity.
    ///
    /// # Errors
    /// * `UserNotFound` - User no longer exists
    /// * `Internal` - Storage failed
    async fn current_user(&self, user_id: &UserId) -> Result<PublicUser, AuthError>;

    /// Check that the backing store answers.
    ///
    /// # Errors
    /// * `Internal` - Store is unreachable
    async fn health_check(&self) -> Result<(), AuthError>;
}
