use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AuthSession;
use crate::domain::authentication::models::Identity;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::RegisterCommand;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionId;
use crate::domain::session::ports::SessionRepository;
use crate::domain::user::models::PublicUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Domain service orchestrating users, sessions and tokens.
///
/// Holds no state of its own: email uniqueness and session rotation are
/// enforced by the injected stores.
pub struct AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    users: Arc<UR>,
    sessions: Arc<SR>,
    authenticator: Arc<Authenticator>,
    // Verified against when the email is unknown so both login failures cost
    // one Argon2 run.
    dummy_password_hash: String,
}

impl<UR, SR> AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `sessions` - Session persistence implementation
    /// * `authenticator` - Password hashing and token signing
    pub fn new(users: Arc<UR>, sessions: Arc<SR>, authenticator: Arc<Authenticator>) -> Self {
        let dummy_password_hash = authenticator
            .hash_password("timing-equalizer-password")
            .unwrap_or_default();

        Self {
            users,
            sessions,
            authenticator,
            dummy_password_hash,
        }
    }

    /// Create a session for `user` and issue its first token pair.
    async fn open_session(&self, user: &User) -> Result<AuthSession, AuthError> {
        let session_id = SessionId::new();
        let tokens = self
            .authenticator
            .issue_tokens(user.id, session_id)
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        let session = Session::new(
            session_id,
            user.id,
            auth::hash_refresh_token(&tokens.refresh_token),
            tokens.refresh_expires_at,
        );
        self.sessions.create(session).await?;

        tracing::info!(user_id = %user.id, session_id = %session_id, "Session opened");

        Ok(AuthSession {
            user: user.into(),
            session_id,
            tokens,
        })
    }
}

/// Parse `sub` and `sid` out of verified claims.
fn claim_ids(claims: &Claims) -> Option<(UserId, SessionId)> {
    let user_id = UserId::from_string(&claims.sub).ok()?;
    let session_id = SessionId::from_string(&claims.sid).ok()?;
    Some((user_id, session_id))
}

#[async_trait]
impl<UR, SR> AuthServicePort for AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError> {
        if self.users.find_by_email(&command.email).await?.is_some() {
            tracing::debug!(email = %command.email, "Registration rejected: email taken");
            return Err(AuthError::EmailAlreadyRegistered);
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;

        // A concurrent registration can still win the race here; the store's
        // unique constraint turns that into EmailAlreadyRegistered.
        let user = self
            .users
            .create(User::new(command.email, command.name, password_hash))
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        self.open_session(&user).await
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError> {
        let user = self.users.find_by_email(&command.email).await?;

        let Some(user) = user else {
            let _ = self
                .authenticator
                .verify_password(command.password.expose(), &self.dummy_password_hash);
            tracing::warn!("Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .authenticator
            .verify_password(command.password.expose(), &user.password_hash)
        {
            tracing::warn!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        self.open_session(&user).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        let claims = self
            .authenticator
            .validate_refresh_token(refresh_token)
            .map_err(|e| {
                tracing::warn!(error = %e, "Refresh rejected: token verification failed");
                AuthError::InvalidRefreshToken
            })?;

        let (user_id, session_id) = claim_ids(&claims).ok_or_else(|| {
            tracing::warn!("Refresh rejected: unparseable sub/sid claims");
            AuthError::InvalidRefreshToken
        })?;

        let user = self.users.find_by_id(&user_id).await?.ok_or_else(|| {
            tracing::warn!(user_id = %user_id, "Refresh rejected: user not found");
            AuthError::InvalidRefreshToken
        })?;

        let session = self
            .sessions
            .find_active(&session_id, &user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(
                    user_id = %user_id,
                    session_id = %session_id,
                    "Refresh rejected: session not active"
                );
                AuthError::InvalidRefreshToken
            })?;

        if !auth::refresh_token_matches(refresh_token, &session.refresh_token_hash) {
            tracing::warn!(
                user_id = %user_id,
                session_id = %session_id,
                "Refresh rejected: token does not match current rotation"
            );
            return Err(AuthError::InvalidRefreshToken);
        }

        let tokens = self
            .authenticator
            .issue_tokens(user.id, session.id)
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        self.sessions
            .rotate(
                &session.id,
                &auth::hash_refresh_token(&tokens.refresh_token),
                tokens.refresh_expires_at,
            )
            .await?
            .ok_or_else(|| {
                tracing::warn!(session_id = %session_id, "Refresh rejected: session vanished");
                AuthError::InvalidRefreshToken
            })?;

        tracing::debug!(user_id = %user_id, session_id = %session_id, "Session rotated");

        Ok(AuthSession {
            user: (&user).into(),
            session_id: session.id,
            tokens,
        })
    }

    async fn authenticate(&self, access_token: &str) -> Result<Identity, AuthError> {
        let claims = self
            .authenticator
            .validate_access_token(access_token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token rejected");
                AuthError::Unauthorized
            })?;

        let (user_id, session_id) = claim_ids(&claims).ok_or(AuthError::Unauthorized)?;

        let user = self.users.find_by_id(&user_id).await?.ok_or_else(|| {
            tracing::debug!(user_id = %user_id, "Access token rejected: user not found");
            AuthError::Unauthorized
        })?;

        self.sessions
            .find_active(&session_id, &user_id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(
                    user_id = %user_id,
                    session_id = %session_id,
                    "Access token rejected: session not active"
                );
                AuthError::Unauthorized
            })?;

        Ok(Identity::new(&user, session_id))
    }

    async fn logout_session(
        &self,
        user_id: &UserId,
        session_id: &SessionId,
    ) -> Result<(), AuthError> {
        let revoked = self.sessions.revoke(session_id, user_id).await?;
        tracing::info!(
            user_id = %user_id,
            session_id = %session_id,
            revoked,
            "Session logged out"
        );
        Ok(())
    }

    async fn revoke_all(&self, user_id: &UserId) -> Result<(), AuthError> {
        let user = self.users.find_by_id(user_id).await?.ok_or_else(|| {
            tracing::warn!(user_id = %user_id, "Revoke-all rejected: user not found");
            AuthError::UserNotFound
        })?;

        let count = self.sessions.revoke_all(&user.id).await?;
        tracing::info!(user_id = %user.id, count, "All sessions revoked");
        Ok(())
    }

    async fn current_user(&self, user_id: &UserId) -> Result<PublicUser, AuthError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(|ref user| user.into())
            .ok_or(AuthError::UserNotFound)
    }

    async fn health_check(&self) -> Result<(), AuthError> {
        self.users.ping().await.map_err(AuthError::from)
    }
}
