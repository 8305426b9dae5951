pub mod config;
pub mod console;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::database::event_store::{EventStore, PgEventStore};
use crate::database::memory::{InMemoryEventStore, InMemoryUserStore};
use crate::database::user_store::{PgUserStore, UserStore};
use crate::services::{event_service::EventService, user_service::UserService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub user_service: UserService,
    pub event_service: EventService,
}

impl AppState {
    pub fn new(config: Config, users: Arc<dyn UserStore>, events: Arc<dyn EventStore>) -> Self {
        Self {
            config: Arc::new(config),
            user_service: UserService::new(users),
            event_service: EventService::new(events),
        }
    }

    pub fn with_postgres(config: Config, pool: PgPool) -> Self {
        Self::new(
            config,
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgEventStore::new(pool)),
        )
    }

    /// Process-local stores; contents are lost on restart.
    pub fn in_memory(config: Config) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryEventStore::new()),
        )
    }
}
