use std::sync::Arc;

use uuid::Uuid;

use crate::database::event_store::EventStore;
use crate::error::{Error, Result};
use crate::middleware::auth::Principal;
use crate::models::event::{Event, EventStatus, NewEvent};

pub const INVALID_STATUS: &str = "Invalid status specified";
pub const EVENT_NOT_FOUND: &str = "No event found with that ID";

#[derive(Clone)]
pub struct EventService {
    store: Arc<dyn EventStore>,
}

impl EventService {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Event>> {
        self.store.list().await
    }

    pub async fn submit(&self, principal: &Principal, event: NewEvent) -> Result<Event> {
        let created = self.store.insert(event).await?;
        tracing::info!(organizer = %principal.id, event = %created.id, "event submitted for review");
        Ok(created)
    }

    pub async fn update_status(&self, principal: &Principal, event_id: Uuid, status: &str) -> Result<Event> {
        let status: EventStatus = status
            .parse()
            .map_err(|_| Error::BadRequest(INVALID_STATUS.to_string()))?;

        let event = self
            .store
            .set_status(event_id, status)
            .await?
            .ok_or_else(|| Error::NotFound(EVENT_NOT_FOUND.to_string()))?;

        tracing::info!(actor = %principal.id, event = %event_id, status = %status, "event status updated");
        Ok(event)
    }

    pub async fn delete(&self, principal: &Principal, event_id: Uuid) -> Result<()> {
        if !self.store.delete(event_id).await? {
            return Err(Error::NotFound(EVENT_NOT_FOUND.to_string()));
        }
        tracing::info!(actor = %principal.id, event = %event_id, "event deleted");
        Ok(())
    }
}
