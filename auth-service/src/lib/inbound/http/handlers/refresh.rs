use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::AuthUserResponseData;
use crate::domain::authentication::errors::AuthError;
use crate::inbound::http::cookies::extract_cookie;
use crate::inbound::http::cookies::REFRESH_TOKEN_COOKIE;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(HeaderMap, ApiSuccess<AuthUserResponseData>), ApiError> {
    let refresh_token = extract_cookie(&headers, REFRESH_TOKEN_COOKIE).ok_or_else(|| {
        tracing::debug!("Missing refresh token cookie");
        ApiError::from(AuthError::InvalidRefreshToken)
    })?;

    let session = state
        .auth_service
        .refresh(&refresh_token)
        .await
        .map_err(ApiError::from)?;

    let cookies = state.cookies.token_cookies(&session.tokens)?;

    Ok((
        cookies,
        ApiSuccess::new(StatusCode::OK, (&session.user).into()),
    ))
}
