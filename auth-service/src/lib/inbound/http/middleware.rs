use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

use super::cookies::extract_cookie;
use super::cookies::ACCESS_TOKEN_COOKIE;
use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that resolves the access cookie into an [`Identity`] and adds it
/// to request extensions.
///
/// Every request re-checks the backing session, so revoking a session cuts
/// off its access tokens before they expire.
///
/// [`Identity`]: crate::domain::authentication::models::Identity
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_cookie(req.headers(), ACCESS_TOKEN_COOKIE).ok_or_else(|| {
        tracing::debug!("Missing access token cookie");
        ApiError::Unauthorized("Missing access token".to_string())
    })?;

    let identity = state
        .auth_service
        .authenticate(&token)
        .await
        .map_err(ApiError::from)?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
