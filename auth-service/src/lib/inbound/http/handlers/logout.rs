use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::OkResponseData;
use crate::domain::authentication::models::Identity;
use crate::inbound::http::router::AppState;

/// Revoke the session behind the presented access token.
///
/// Both cookies are cleared on every outcome, including store failures.
pub async fn logout(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> (HeaderMap, Result<ApiSuccess<OkResponseData>, ApiError>) {
    let cookies = state.cookies.cleared_cookies();

    let result = state
        .auth_service
        .logout_session(&identity.user_id, &identity.session_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, OkResponseData { ok: true }));

    (cookies, result)
}

#[cfg(test)]
mod tests {
    use axum::http::header::SET_COOKIE;
    use axum::response::IntoResponse;

    use super::*;
    use crate::domain::authentication::errors::AuthError;
    use crate::inbound::http::handlers::test_support::app_state;
    use crate::inbound::http::handlers::test_support::identity;
    use crate::inbound::http::handlers::test_support::MockAuthService;

    #[tokio::test]
    async fn test_logout_clears_cookies() {
        let identity = identity();
        let expected = identity.clone();
        let mut auth_service = MockAuthService::new();
        auth_service
            .expect_logout_session()
            .withf(move |user_id, session_id| {
                user_id == &expected.user_id && session_id == &expected.session_id
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let response = logout(State(app_state(auth_service)), Extension(identity))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get_all(SET_COOKIE).iter().count(), 2);
    }

    #[tokio::test]
    async fn test_logout_clears_cookies_when_store_fails() {
        let mut auth_service = MockAuthService::new();
        auth_service
            .expect_logout_session()
            .times(1)
            .returning(|_, _| Err(AuthError::Internal("connection reset".to_string())));

        let response = logout(State(app_state(auth_service)), Extension(identity()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let cookies: Vec<_> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
    }
}
