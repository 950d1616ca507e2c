//! Booking handlers: book, confirm, list.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::request::{BookEventRequest, ConfirmBookingRequest};
use crate::dto::response::{BookingCreatedResponse, BookingListResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{ValidatedJson, parse_uuid};
use crate::state::AppState;

/// POST /api/events/{id}/book
pub async fn book_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<BookEventRequest>,
) -> Result<(StatusCode, Json<BookingCreatedResponse>), ApiError> {
    let event_id = parse_uuid("event id", &id)?;
    let receipt = state.bookings.book_event(event_id, &req.email).await?;
    Ok((StatusCode::CREATED, Json(receipt.into())))
}

/// POST /api/events/{id}/confirm
pub async fn confirm_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ConfirmBookingRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let event_id = parse_uuid("event id", &id)?;
    let booking_id = parse_uuid("booking_id", &req.booking_id)?;
    state.bookings.confirm_booking(event_id, booking_id).await?;
    Ok(Json(MessageResponse::new("booking confirmed successfully")))
}

/// GET /api/events/{id}/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookingListResponse>, ApiError> {
    let event_id = parse_uuid("event id", &id)?;
    let bookings = state.bookings.list_bookings_by_event(event_id).await?;
    Ok(Json(BookingListResponse { bookings }))
}
