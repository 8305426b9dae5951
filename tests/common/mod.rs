#![allow(dead_code)]

use std::sync::Arc;

use admin_panel::{
    config::{Config, LogFormat},
    database::{
        memory::{InMemoryEventStore, InMemoryUserStore},
        user_store::{UserInsert, UserStore},
    },
    middleware::auth::Claims,
    models::user::{Role, User},
    routes, AppState,
};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test_secret_key";

pub fn test_config(api_rps: u32) -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        database_url: None,
        jwt_secret: JWT_SECRET.into(),
        api_rps,
        cors_origins: Vec::new(),
        log_format: LogFormat::Text,
        bootstrap_admin: None,
    }
}

pub struct TestApp {
    pub app: Router,
    pub users: Arc<InMemoryUserStore>,
    pub events: Arc<InMemoryEventStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_rps(1000)
    }

    pub fn with_rps(api_rps: u32) -> Self {
        let users = Arc::new(InMemoryUserStore::new());
        let events = Arc::new(InMemoryEventStore::new());
        let state = AppState::new(test_config(api_rps), users.clone(), events.clone());
        Self {
            app: routes::app(state),
            users,
            events,
        }
    }

    pub async fn seed_user(&self, name: &str, role: Role) -> User {
        self.users
            .insert(UserInsert {
                name: name.into(),
                email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
                role,
                password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            })
            .await
            .expect("seed user")
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<JsonValue>,
    ) -> (StatusCode, JsonValue) {
        send(&self.app, method, uri, token, body).await
    }
}

pub fn token_for(id: Uuid) -> String {
    let exp = (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize;
    encode(
        &Header::default(),
        &Claims {
            sub: id.to_string(),
            exp,
        },
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("sign token")
}

/// Sends one request through the router. Empty bodies decode to `Null`.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header("authorization", format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => req
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => req.body(Body::empty()),
    }
    .unwrap();

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
