use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::user_dto::STATUS_SUCCESS;
use crate::models::event::{Event, EventStatus, NewEvent};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub status: EventStatus,
    pub organizer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventListResponse {
    pub status: String,
    pub results: usize,
    pub data: Vec<EventResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventData {
    pub event: EventResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventEnvelope {
    pub status: String,
    pub data: EventData,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEventStatusPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEventPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    pub date: DateTime<Utc>,
}

impl CreateEventPayload {
    pub fn into_new_event(self, organizer_id: Uuid) -> NewEvent {
        NewEvent {
            title: self.title,
            description: self.description,
            location: self.location,
            date: self.date,
            organizer_id: Some(organizer_id),
        }
    }
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            location: value.location,
            date: value.date,
            status: value.status,
            organizer_id: value.organizer_id,
            created_at: value.created_at,
        }
    }
}

impl From<Vec<Event>> for EventListResponse {
    fn from(value: Vec<Event>) -> Self {
        let data: Vec<EventResponse> = value.into_iter().map(Into::into).collect();
        Self {
            status: STATUS_SUCCESS.to_string(),
            results: data.len(),
            data,
        }
    }
}

impl From<Event> for EventEnvelope {
    fn from(value: Event) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            data: EventData { event: value.into() },
        }
    }
}
