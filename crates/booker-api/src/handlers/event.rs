//! Event management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::request::CreateEventRequest;
use crate::dto::response::{EventListResponse, EventResponse, EventView};
use crate::error::ApiError;
use crate::extractors::{ValidatedJson, parse_uuid};
use crate::state::AppState;

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    let event = state.events.create_event(req.into_create_event()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(EventResponse {
            event: event.into(),
            message: Some("event created successfully".to_string()),
        }),
    ))
}

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<EventListResponse>, ApiError> {
    let events = state.events.list_events().await?;
    Ok(Json(EventListResponse {
        events: events.into_iter().map(EventView::from).collect(),
    }))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EventResponse>, ApiError> {
    let id = parse_uuid("event id", &id)?;
    let event = state.events.get_event(id).await?;
    Ok(Json(EventResponse {
        event: event.into(),
        message: None,
    }))
}
