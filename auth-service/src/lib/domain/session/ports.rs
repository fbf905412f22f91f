use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionId;
use crate::domain::user::models::UserId;

/// Persistence operations for refresh sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync + 'static {
    /// Persist a new session.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, session: Session) -> Result<Session, SessionError>;

    /// Retrieve a session that belongs to `user_id`, is not revoked and has
    /// not expired.
    ///
    /// # Returns
    /// None for unknown, foreign, revoked or expired sessions
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_active(
        &self,
        id: &SessionId,
        user_id: &UserId,
    ) -> Result<Option<Session>, SessionError>;

    /// Atomically replace the refresh token digest and expiry, bumping
    /// `updated_at`.
    ///
    /// # Returns
    /// Updated session, or None if it vanished concurrently
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn rotate(
        &self,
        id: &SessionId,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Option<Session>, SessionError>;

    /// Revoke one non-revoked session owned by `user_id`.
    ///
    /// # Returns
    /// True if a session was revoked by this call, false if there was nothing
    /// to revoke
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn revoke(&self, id: &SessionId, user_id: &UserId) -> Result<bool, SessionError>;

    /// Revoke every non-revoked session owned by `user_id`.
    ///
    /// # Returns
    /// Number of sessions revoked
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn revoke_all(&self, user_id: &UserId) -> Result<u64, SessionError>;
}
