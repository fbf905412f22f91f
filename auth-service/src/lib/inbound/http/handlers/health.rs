use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn database_health(
    State(state): State<AppState>,
) -> Result<ApiSuccess<HealthResponseData>, ApiError> {
    state.auth_service.health_check().await.map_err(|e| {
        tracing::error!(error = %e, "Database health check failed");
        ApiError::ServiceUnavailable("Database unavailable".to_string())
    })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        HealthResponseData {
            status: "ok".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub status: String,
}
