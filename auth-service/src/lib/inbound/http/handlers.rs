use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::authentication::errors::AuthError;
use crate::domain::user::models::PublicUser;

pub mod health;
pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;
pub mod revoke;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    ServiceUnavailable(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailAlreadyRegistered => ApiError::Conflict(err.to_string()),
            AuthError::InvalidCredentials
            | AuthError::InvalidRefreshToken
            | AuthError::Unauthorized
            | AuthError::UserNotFound => ApiError::Unauthorized(err.to_string()),
            AuthError::Internal(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// `{ "user": ... }` payload shared by register, login, refresh and me.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthUserResponseData {
    pub user: UserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PublicUser> for UserData {
    fn from(user: &PublicUser) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&PublicUser> for AuthUserResponseData {
    fn from(user: &PublicUser) -> Self {
        Self { user: user.into() }
    }
}

/// `{ "ok": true }` payload for logout and revoke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OkResponseData {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_do_not_leak_cause() {
        for err in [
            AuthError::InvalidCredentials,
            AuthError::InvalidRefreshToken,
            AuthError::Unauthorized,
            AuthError::UserNotFound,
        ] {
            assert!(matches!(ApiError::from(err), ApiError::Unauthorized(_)));
        }

        assert_eq!(
            ApiError::from(AuthError::UserNotFound),
            ApiError::Unauthorized("Unauthorized".to_string())
        );
        assert_eq!(
            ApiError::from(AuthError::EmailAlreadyRegistered),
            ApiError::Conflict("Email already registered".to_string())
        );
    }

    #[test]
    fn test_internal_error_body_is_generic() {
        let response =
            ApiError::from(AuthError::Internal("pool timed out".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use async_trait::async_trait;
    use mockall::mock;

    use crate::config::CookieConfig;
    use crate::domain::authentication::errors::AuthError;
    use crate::domain::authentication::models::AuthSession;
    use crate::domain::authentication::models::Identity;
    use crate::domain::authentication::models::LoginCommand;
    use crate::domain::authentication::models::RegisterCommand;
    use crate::domain::authentication::ports::AuthServicePort;
    use crate::domain::session::models::SessionId;
    use crate::domain::user::models::DisplayName;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::PublicUser;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;
    use crate::inbound::http::cookies::CookiePolicy;
    use crate::inbound::http::router::AppState;

    mock! {
        pub AuthService {}

        #[async_trait]
        impl AuthServicePort for AuthService {
            async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError>;
            async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError>;
            async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError>;
            async fn authenticate(&self, access_token: &str) -> Result<Identity, AuthError>;
            async fn logout_session(&self, user_id: &UserId, session_id: &SessionId) -> Result<(), AuthError>;
            async fn revoke_all(&self, user_id: &UserId) -> Result<(), AuthError>;
            async fn current_user(&self, user_id: &UserId) -> Result<PublicUser, AuthError>;
            async fn health_check(&self) -> Result<(), AuthError>;
        }
    }

    pub fn app_state(auth_service: MockAuthService) -> AppState {
        AppState {
            auth_service: Arc::new(auth_service),
            cookies: Arc::new(CookiePolicy::new(&CookieConfig::default(), 900, 604800)),
        }
    }

    pub fn identity() -> Identity {
        let user = User::new(
            EmailAddress::new("a@b.com").unwrap(),
            DisplayName::new("A B").unwrap(),
            "$argon2id$hash".to_string(),
        );
        Identity::new(&user, SessionId::new())
    }
}
