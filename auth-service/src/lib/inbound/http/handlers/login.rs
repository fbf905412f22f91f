use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::AuthUserResponseData;
use crate::domain::authentication::errors::PasswordPolicyError;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::Password;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;
use crate::domain::user::errors::EmailError;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<(HeaderMap, ApiSuccess<AuthUserResponseData>), ApiError> {
    let session = state
        .auth_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    let cookies = state.cookies.token_cookies(&session.tokens)?;

    Ok((
        cookies,
        ApiSuccess::new(StatusCode::OK, (&session.user).into()),
    ))
}

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseLoginRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

impl LoginRequestBody {
    fn try_into_command(self) -> Result<LoginCommand, ParseLoginRequestError> {
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(LoginCommand::new(email, password))
    }
}

impl From<ParseLoginRequestError> for ApiError {
    fn from(err: ParseLoginRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
