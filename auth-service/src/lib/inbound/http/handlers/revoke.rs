use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::OkResponseData;
use crate::domain::authentication::models::Identity;
use crate::inbound::http::router::AppState;

/// Sign out everywhere: revoke every session of the caller.
///
/// Both cookies are cleared on every outcome, including store failures.
pub async fn revoke(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> (HeaderMap, Result<ApiSuccess<OkResponseData>, ApiError>) {
    let cookies = state.cookies.cleared_cookies();

    let result = state
        .auth_service
        .revoke_all(&identity.user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, OkResponseData { ok: true }));

    (cookies, result)
}
