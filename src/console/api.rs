use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dto::event_dto::{EventEnvelope, EventListResponse, EventResponse};
use crate::dto::user_dto::{UserEnvelope, UserListResponse, UserResponse};
use crate::models::event::EventStatus;
use crate::models::user::Role;

pub const MISSING_TOKEN: &str = "No authentication token found. Please login again.";

pub type ApiResult<T> = std::result::Result<T, ConsoleError>;

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("No authentication token found. Please login again.")]
    MissingToken,

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ConsoleError {
    /// The message the server put in its error body, if there was one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ConsoleError::Unauthenticated(m)
            | ConsoleError::Forbidden(m)
            | ConsoleError::NotFound(m)
            | ConsoleError::Rejected { message: m, .. } => {
                Some(m.as_str()).filter(|m| !m.is_empty())
            }
            _ => None,
        }
    }
}

/// Typed access to the management endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn list_users(&self) -> ApiResult<Vec<UserResponse>>;
    async fn update_user_role(&self, id: Uuid, role: Role) -> ApiResult<UserResponse>;
    async fn delete_user(&self, id: Uuid) -> ApiResult<()>;
    async fn list_events(&self) -> ApiResult<Vec<EventResponse>>;
    async fn update_event_status(&self, id: Uuid, status: EventStatus) -> ApiResult<EventResponse>;
    async fn delete_event(&self, id: Uuid) -> ApiResult<()>;
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// [`DirectoryApi`] over HTTP with a bearer session. A 401 from the server
/// ends the session: the token is dropped and later calls fail with
/// [`ConsoleError::MissingToken`] without a request being sent.
pub struct HttpDirectoryApi {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpDirectoryApi {
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let token = self
            .token
            .read()
            .await
            .clone()
            .ok_or(ConsoleError::MissingToken)?;

        let response = request.bearer_auth(token).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|b| b.message)
            .unwrap_or_default();
        tracing::warn!(status = %status, message = %message, "management request failed");

        Err(match status {
            StatusCode::UNAUTHORIZED => {
                self.clear_token().await;
                ConsoleError::Unauthenticated(message)
            }
            StatusCode::FORBIDDEN => ConsoleError::Forbidden(message),
            StatusCode::NOT_FOUND => ConsoleError::NotFound(message),
            other => ConsoleError::Rejected {
                status: other.as_u16(),
                message,
            },
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ConsoleError::Decode(e.to_string()))
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectoryApi {
    async fn list_users(&self) -> ApiResult<Vec<UserResponse>> {
        let response = self.send(self.client.get(self.url("/users"))).await?;
        let body: UserListResponse = Self::decode(response).await?;
        Ok(body.data)
    }

    async fn update_user_role(&self, id: Uuid, role: Role) -> ApiResult<UserResponse> {
        let request = self
            .client
            .patch(self.url(&format!("/users/{}/role", id)))
            .json(&json!({ "role": role }));
        let body: UserEnvelope = Self::decode(self.send(request).await?).await?;
        Ok(body.data.user)
    }

    async fn delete_user(&self, id: Uuid) -> ApiResult<()> {
        self.send(self.client.delete(self.url(&format!("/users/{}", id))))
            .await?;
        Ok(())
    }

    async fn list_events(&self) -> ApiResult<Vec<EventResponse>> {
        let response = self.send(self.client.get(self.url("/events"))).await?;
        let body: EventListResponse = Self::decode(response).await?;
        Ok(body.data)
    }

    async fn update_event_status(&self, id: Uuid, status: EventStatus) -> ApiResult<EventResponse> {
        let request = self
            .client
            .patch(self.url(&format!("/events/{}/status", id)))
            .json(&json!({ "status": status }));
        let body: EventEnvelope = Self::decode(self.send(request).await?).await?;
        Ok(body.data.event)
    }

    async fn delete_event(&self, id: Uuid) -> ApiResult<()> {
        self.send(self.client.delete(self.url(&format!("/events/{}", id))))
            .await?;
        Ok(())
    }
}
