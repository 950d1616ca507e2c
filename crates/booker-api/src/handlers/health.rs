//! Health check handler.

use axum::Json;
use axum::extract::State;

use booker_core::error::AppError;

use crate::dto::response::HealthResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let healthy = state.stores.inventory.health_check().await.unwrap_or(false);
    if !healthy {
        return Err(AppError::service_unavailable("database is unreachable").into());
    }

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        database: "connected".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
