pub mod docs;
pub mod events;
pub mod health;
pub mod users;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::middleware::auth::{authenticate, restrict_to, ADMIN_ONLY, ORGANIZER_OR_ADMIN};
use crate::middleware::cors::cors_layer;
use crate::middleware::rate_limit::{rps_middleware, RateLimiter};
use crate::AppState;

pub(crate) fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::BadRequest("Invalid id".to_string()))
}

/// The full application: public health and docs routes plus the management
/// API under `/api/v1`. Management routes run rate limit → authentication →
/// role gate, in that order, before any handler.
pub fn app(state: AppState) -> Router {
    let admin = Router::new()
        .route("/users", get(users::list_users))
        .route("/users/:id/role", patch(users::update_user_role))
        .route("/users/:id", delete(users::delete_user))
        .route("/events", get(events::list_events))
        .route("/events/:id/status", patch(events::update_event_status))
        .route("/events/:id", delete(events::delete_event))
        .route_layer(from_fn_with_state(ADMIN_ONLY, restrict_to));

    let organizer = Router::new()
        .route("/events", post(events::create_event))
        .route_layer(from_fn_with_state(ORGANIZER_OR_ADMIN, restrict_to));

    let api = admin
        .merge(organizer)
        .route_layer(from_fn_with_state(state.clone(), authenticate))
        .route_layer(from_fn_with_state(
            RateLimiter::new(state.config.api_rps),
            rps_middleware,
        ));

    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
