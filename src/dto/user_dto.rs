use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{Role, User};

pub const STATUS_SUCCESS: &str = "success";

/// Wire form of a directory entry. Credential material has no field here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub status: String,
    pub results: usize,
    pub data: Vec<UserResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserData {
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    pub status: String,
    pub data: UserData,
}

/// Body of `PATCH /users/{id}/role`. The role stays a string here so that an
/// unknown value is reported by the service as an invalid role rather than as
/// a JSON shape error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRolePayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            role: value.role,
            created_at: value.created_at,
        }
    }
}

impl From<Vec<User>> for UserListResponse {
    fn from(value: Vec<User>) -> Self {
        let data: Vec<UserResponse> = value.into_iter().map(Into::into).collect();
        Self {
            status: STATUS_SUCCESS.to_string(),
            results: data.len(),
            data,
        }
    }
}

impl From<User> for UserEnvelope {
    fn from(value: User) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            data: UserData { user: value.into() },
        }
    }
}
