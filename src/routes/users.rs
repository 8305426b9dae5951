use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};

use super::parse_id;
use crate::{
    dto::user_dto::{UpdateRolePayload, UserEnvelope, UserListResponse},
    error::Result,
    middleware::auth::Principal,
    utils::validation::ValidatedJson,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every directory entry, in insertion order", body = UserListResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    )
)]
#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.user_service.list().await?;
    Ok(Json(UserListResponse::from(users)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}/role",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID (UUID)")
    ),
    request_body = UpdateRolePayload,
    responses(
        (status = 200, description = "Role updated", body = UserEnvelope),
        (status = 400, description = "Invalid role or id"),
        (status = 403, description = "Caller is not an admin, or targets itself"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn update_user_role(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateRolePayload>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    let user = state
        .user_service
        .update_role(&principal, id, &payload.role)
        .await?;
    Ok(Json(UserEnvelope::from(user)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID (UUID)")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid id"),
        (status = 403, description = "Caller is not an admin, or targets itself"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id)?;
    state.user_service.delete(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
