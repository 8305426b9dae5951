use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::event::{Event, EventRow, EventStatus, NewEvent};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    /// All events in insertion order.
    async fn list(&self) -> Result<Vec<Event>>;
    async fn insert(&self, event: NewEvent) -> Result<Event>;
    /// Returns `None` when no event has `id`.
    async fn set_status(&self, id: Uuid, status: EventStatus) -> Result<Option<Event>>;
    /// Returns `false` when no event has `id`.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

const EVENT_COLUMNS: &str =
    "id, title, description, location, date, status, organizer_id, created_at";

#[derive(Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn list(&self) -> Result<Vec<Event>> {
        let query = format!("SELECT {} FROM events ORDER BY seq ASC", EVENT_COLUMNS);
        let rows = sqlx::query_as::<_, EventRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Event::try_from).collect()
    }

    async fn insert(&self, event: NewEvent) -> Result<Event> {
        let query = format!(
            "INSERT INTO events (id, title, description, location, date, status, organizer_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            EVENT_COLUMNS
        );
        let row = sqlx::query_as::<_, EventRow>(&query)
            .bind(Uuid::new_v4())
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.location)
            .bind(event.date)
            .bind(EventStatus::Pending.as_str())
            .bind(event.organizer_id)
            .fetch_one(&self.pool)
            .await?;
        Event::try_from(row)
    }

    async fn set_status(&self, id: Uuid, status: EventStatus) -> Result<Option<Event>> {
        let query = format!(
            "UPDATE events SET status = $2 WHERE id = $1 RETURNING {}",
            EVENT_COLUMNS
        );
        let row = sqlx::query_as::<_, EventRow>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Event::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
