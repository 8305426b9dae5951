//! In-memory stores used when no `DATABASE_URL` is configured, and by tests.
//!
//! Entries live in insertion-ordered vectors behind a `tokio` lock so each
//! call is atomic with respect to other calls on the same store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::event_store::EventStore;
use super::user_store::{UserInsert, UserStore};
use crate::error::{Error, Result};
use crate::models::event::{Event, EventStatus, NewEvent};
use crate::models::user::{Role, User};

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, user: UserInsert) -> Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(Error::BadRequest(format!(
                "A user with email {} already exists",
                user.email
            )));
        }
        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            role: user.role,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn set_role(&self, id: Uuid, role: Role) -> Result<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.iter_mut().find(|u| u.id == id).map(|u| {
            u.role = role;
            u.updated_at = Utc::now();
            u.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryEventStore {
    events: RwLock<Vec<Event>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn list(&self) -> Result<Vec<Event>> {
        Ok(self.events.read().await.clone())
    }

    async fn insert(&self, event: NewEvent) -> Result<Event> {
        let created = Event {
            id: Uuid::new_v4(),
            title: event.title,
            description: event.description,
            location: event.location,
            date: event.date,
            status: EventStatus::Pending,
            organizer_id: event.organizer_id,
            created_at: Utc::now(),
        };
        self.events.write().await.push(created.clone());
        Ok(created)
    }

    async fn set_status(&self, id: Uuid, status: EventStatus) -> Result<Option<Event>> {
        let mut events = self.events.write().await;
        Ok(events.iter_mut().find(|e| e.id == id).map(|e| {
            e.status = status;
            e.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|e| e.id != id);
        Ok(events.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert_for(name: &str) -> UserInsert {
        UserInsert {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: Role::User,
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = InMemoryUserStore::new();
        for name in ["Zed", "Amy", "Mo"] {
            store.insert(insert_for(name)).await.unwrap();
        }
        let names: Vec<String> = store.list().await.unwrap().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Zed", "Amy", "Mo"]);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = InMemoryUserStore::new();
        store.insert(insert_for("Amy")).await.unwrap();
        assert!(store.insert(insert_for("Amy")).await.is_err());
    }

    #[tokio::test]
    async fn set_role_and_delete_report_missing_entries() {
        let store = InMemoryUserStore::new();
        let missing = Uuid::new_v4();
        assert!(store.set_role(missing, Role::Admin).await.unwrap().is_none());
        assert!(!store.delete(missing).await.unwrap());

        let amy = store.insert(insert_for("Amy")).await.unwrap();
        let updated = store.set_role(amy.id, Role::Organizer).await.unwrap().unwrap();
        assert_eq!(updated.role, Role::Organizer);
        assert_eq!(updated.created_at, amy.created_at);
        assert!(store.delete(amy.id).await.unwrap());
        assert!(!store.delete(amy.id).await.unwrap());
    }

    #[tokio::test]
    async fn events_start_pending() {
        let store = InMemoryEventStore::new();
        let event = store
            .insert(NewEvent {
                title: "Meetup".into(),
                description: String::new(),
                location: "Hall A".into(),
                date: Utc::now(),
                organizer_id: None,
            })
            .await
            .unwrap();
        assert_eq!(event.status, EventStatus::Pending);
        let approved = store
            .set_status(event.id, EventStatus::Approved)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(approved.status, EventStatus::Approved);
    }
}
