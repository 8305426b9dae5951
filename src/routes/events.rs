use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};

use super::parse_id;
use crate::{
    dto::event_dto::{CreateEventPayload, EventEnvelope, EventListResponse, UpdateEventStatusPayload},
    error::Result,
    middleware::auth::Principal,
    utils::validation::ValidatedJson,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "events",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every event, in insertion order", body = EventListResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    )
)]
#[axum::debug_handler]
pub async fn list_events(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let events = state.event_service.list().await?;
    Ok(Json(EventListResponse::from(events)))
}

#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "events",
    security(("bearer_auth" = [])),
    request_body = CreateEventPayload,
    responses(
        (status = 201, description = "Event submitted for moderation", body = EventEnvelope),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Caller is neither organizer nor admin")
    )
)]
#[axum::debug_handler]
pub async fn create_event(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(payload): ValidatedJson<CreateEventPayload>,
) -> Result<impl IntoResponse> {
    let event = state
        .event_service
        .submit(&principal, payload.into_new_event(principal.id))
        .await?;
    Ok((StatusCode::CREATED, Json(EventEnvelope::from(event))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/events/{id}/status",
    tag = "events",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Event ID (UUID)")
    ),
    request_body = UpdateEventStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = EventEnvelope),
        (status = 400, description = "Invalid status or id"),
        (status = 404, description = "Event not found")
    )
)]
#[axum::debug_handler]
pub async fn update_event_status(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateEventStatusPayload>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let event = state
        .event_service
        .update_status(&principal, id, &payload.status)
        .await?;
    Ok(Json(EventEnvelope::from(event)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    tag = "events",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Event ID (UUID)")
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    state.event_service.delete(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
