use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionId;
use crate::domain::session::ports::SessionRepository;
use crate::domain::user::models::UserId;

pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    user_id: Uuid,
    refresh_token_hash: String,
    expires_at: DateTime<Utc>,
    revoked_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: SessionId(row.id),
            user_id: UserId(row.user_id),
            refresh_token_hash: row.refresh_token_hash,
            expires_at: row.expires_at,
            revoked_at: row.revoked_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn database_error(e: sqlx::Error) -> SessionError {
    SessionError::DatabaseError(e.to_string())
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn create(&self, session: Session) -> Result<Session, SessionError> {
        sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO auth_sessions
                (id, user_id, refresh_token_hash, expires_at, revoked_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, refresh_token_hash, expires_at, revoked_at, created_at, updated_at
            "#,
        )
        .bind(session.id.0)
        .bind(session.user_id.0)
        .bind(&session.refresh_token_hash)
        .bind(session.expires_at)
        .bind(session.revoked_at)
        .bind(session.created_at)
        .bind(session.updated_at)
        .fetch_one(&self.pool)
        .await
        .map(Session::from)
        .map_err(database_error)
    }

    async fn find_active(
        &self,
        id: &SessionId,
        user_id: &UserId,
    ) -> Result<Option<Session>, SessionError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, user_id, refresh_token_hash, expires_at, revoked_at, created_at, updated_at
            FROM auth_sessions
            WHERE id = $1
              AND user_id = $2
              AND revoked_at IS NULL
              AND expires_at > NOW()
            "#,
        )
        .bind(id.0)
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Session::from))
    }

    async fn rotate(
        &self,
        id: &SessionId,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Option<Session>, SessionError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            UPDATE auth_sessions
            SET refresh_token_hash = $2, expires_at = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, refresh_token_hash, expires_at, revoked_at, created_at, updated_at
            "#,
        )
        .bind(id.0)
        .bind(refresh_token_hash)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Session::from))
    }

    async fn revoke(&self, id: &SessionId, user_id: &UserId) -> Result<bool, SessionError> {
        let result = sqlx::query(
            r#"
            UPDATE auth_sessions
            SET revoked_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND revoked_at IS NULL
            "#,
        )
        .bind(id.0)
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke_all(&self, user_id: &UserId) -> Result<u64, SessionError> {
        let result = sqlx::query(
            r#"
            UPDATE auth_sessions
            SET revoked_at = NOW(), updated_at = NOW()
            WHERE user_id = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected())
    }
}
