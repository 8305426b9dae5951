use axum::{response::IntoResponse, Json};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::dto::event_dto::{
    CreateEventPayload, EventData, EventEnvelope, EventListResponse, EventResponse,
    UpdateEventStatusPayload,
};
use crate::dto::user_dto::{UpdateRolePayload, UserData, UserEnvelope, UserListResponse, UserResponse};
use crate::models::event::EventStatus;
use crate::models::user::Role;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::health::health,
        super::users::list_users,
        super::users::update_user_role,
        super::users::delete_user,
        super::events::list_events,
        super::events::create_event,
        super::events::update_event_status,
        super::events::delete_event,
    ),
    components(schemas(
        Role,
        EventStatus,
        UserResponse,
        UserListResponse,
        UserData,
        UserEnvelope,
        UpdateRolePayload,
        EventResponse,
        EventListResponse,
        EventData,
        EventEnvelope,
        UpdateEventStatusPayload,
        CreateEventPayload,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "users", description = "User directory administration"),
        (name = "events", description = "Event submission and moderation"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
