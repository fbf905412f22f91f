//! In-memory stores.
//!
//! Same contracts as the Postgres repositories, backed by maps behind an
//! async `RwLock`. Used by tests and by `database.backend = "memory"`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionId;
use crate::domain::session::ports::SessionRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::errors::UserError;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        // Checked under the write lock, standing in for the unique constraint.
        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn ping(&self) -> Result<(), UserError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: Session) -> Result<Session, SessionError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(SessionError::DatabaseError(format!(
                "duplicate session id {}",
                session.id
            )));
        }
        sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_active(
        &self,
        id: &SessionId,
        user_id: &UserId,
    ) -> Result<Option<Session>, SessionError> {
        let now = Utc::now();
        Ok(self
            .sessions
            .read()
            .await
            .get(id)
            .filter(|session| &session.user_id == user_id && session.is_active(now))
            .cloned())
    }

    async fn rotate(
        &self,
        id: &SessionId,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Option<Session>, SessionError> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.get_mut(id).map(|session| {
            session.refresh_token_hash = refresh_token_hash.to_string();
            session.expires_at = expires_at;
            session.updated_at = Utc::now();
            session.clone()
        }))
    }

    async fn revoke(&self, id: &SessionId, user_id: &UserId) -> Result<bool, SessionError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(id) {
            Some(session) if &session.user_id == user_id && session.revoked_at.is_none() => {
                let now = Utc::now();
                session.revoked_at = Some(now);
                session.updated_at = now;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all(&self, user_id: &UserId) -> Result<u64, SessionError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let mut count = 0;
        for session in sessions
            .values_mut()
            .filter(|session| &session.user_id == user_id && session.revoked_at.is_none())
        {
            session.revoked_at = Some(now);
            session.updated_at = now;
            count += 1;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::user::models::DisplayName;

    fn user(email: &str) -> User {
        User::new(
            EmailAddress::new(email).unwrap(),
            DisplayName::new("A B").unwrap(),
            "$argon2id$hash".to_string(),
        )
    }

    fn session(user_id: UserId) -> Session {
        Session::new(
            SessionId::new(),
            user_id,
            "hash-1".to_string(),
            Utc::now() + Duration::days(7),
        )
    }

    #[tokio::test]
    async fn test_user_email_is_unique() {
        let repository = InMemoryUserRepository::new();

        repository.create(user("a@b.com")).await.unwrap();
        let result = repository.create(user("A@B.com")).await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_find_user() {
        let repository = InMemoryUserRepository::new();
        let created = repository.create(user("a@b.com")).await.unwrap();

        let by_id = repository.find_by_id(&created.id).await.unwrap();
        let by_email = repository
            .find_by_email(&EmailAddress::new("a@b.com").unwrap())
            .await
            .unwrap();

        assert_eq!(by_id.as_ref(), Some(&created));
        assert_eq!(by_email.as_ref(), Some(&created));
        assert!(repository.find_by_id(&UserId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_active_checks_owner() {
        let repository = InMemorySessionRepository::new();
        let owner = UserId::new();
        let created = repository.create(session(owner)).await.unwrap();

        assert!(repository
            .find_active(&created.id, &owner)
            .await
            .unwrap()
            .is_some());
        assert!(repository
            .find_active(&created.id, &UserId::new())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_rotate_replaces_hash_and_expiry() {
        let repository = InMemorySessionRepository::new();
        let created = repository.create(session(UserId::new())).await.unwrap();
        let new_expiry = Utc::now() + Duration::days(8);

        let rotated = repository
            .rotate(&created.id, "hash-2", new_expiry)
            .await
            .unwrap()
            .expect("session should exist");

        assert_eq!(rotated.refresh_token_hash, "hash-2");
        assert_eq!(rotated.expires_at, new_expiry);
        assert!(rotated.updated_at >= created.updated_at);
        assert!(repository
            .rotate(&SessionId::new(), "hash-3", new_expiry)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent_and_owner_scoped() {
        let repository = InMemorySessionRepository::new();
        let owner = UserId::new();
        let created = repository.create(session(owner)).await.unwrap();

        assert!(!repository.revoke(&created.id, &UserId::new()).await.unwrap());
        assert!(repository.revoke(&created.id, &owner).await.unwrap());
        assert!(!repository.revoke(&created.id, &owner).await.unwrap());
        assert!(repository
            .find_active(&created.id, &owner)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_revoke_all_only_touches_owner() {
        let repository = InMemorySessionRepository::new();
        let owner = UserId::new();
        let other = UserId::new();
        let first = repository.create(session(owner)).await.unwrap();
        let second = repository.create(session(owner)).await.unwrap();
        let foreign = repository.create(session(other)).await.unwrap();

        repository.revoke(&first.id, &owner).await.unwrap();
        assert_eq!(repository.revoke_all(&owner).await.unwrap(), 1);

        assert!(repository
            .find_active(&second.id, &owner)
            .await
            .unwrap()
            .is_none());
        assert!(repository
            .find_active(&foreign.id, &other)
            .await
            .unwrap()
            .is_some());
    }
}
