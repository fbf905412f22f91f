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
use crate::domain::authentication::models::Password;
use crate::domain::authentication::models::RegisterCommand;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;
use crate::domain::user::errors::DisplayNameError;
use crate::domain::user::errors::EmailError;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<(HeaderMap, ApiSuccess<AuthUserResponseData>), ApiError> {
    let session = state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    let cookies = state.cookies.token_cookies(&session.tokens)?;

    Ok((
        cookies,
        ApiSuccess::new(StatusCode::OK, (&session.user).into()),
    ))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    email: String,
    name: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid name: {0}")]
    Name(#[from] DisplayNameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;
        let name = DisplayName::new(self.name)?;
        let password = Password::new(self.password)?;
        Ok(RegisterCommand::new(email, name, password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
