//! User registration handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::CreateUserRequest;
use crate::dto::response::UserResponse;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state.users.create_user(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            user,
            message: "user created successfully".to_string(),
        }),
    ))
}
