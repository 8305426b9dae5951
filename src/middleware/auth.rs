use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::user::Role;
use crate::AppState;

pub const NOT_LOGGED_IN: &str = "You are not logged in! Please log in to get access.";
pub const NO_PERMISSION: &str = "You do not have permission to perform this action";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// The authenticated identity behind a request. The role is read from the
/// store on every request, so role changes apply to existing tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub role: Role,
}

fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::Unauthorized(NOT_LOGGED_IN.to_string()))?;
    let value = value
        .to_str()
        .map_err(|_| Error::Unauthorized("Malformed authorization header".to_string()))?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Unauthorized(NOT_LOGGED_IN.to_string()))
}

pub fn decode_claims(token: &str, secret: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        Error::Unauthorized("Invalid token. Please log in again.".to_string())
    })
}

/// Resolves the bearer token to a [`Principal`] and stores it in the request
/// extensions for the role gate and handlers.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let token = bearer_token(req.headers())?;
    let claims = decode_claims(token, &state.config.jwt_secret)?;
    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| Error::Unauthorized("Invalid token. Please log in again.".to_string()))?;
    let principal = state.user_service.resolve_principal(id).await?;

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// The set of roles an operation admits.
#[derive(Debug, Clone, Copy)]
pub struct RoleGate {
    allowed: &'static [Role],
}

pub const ADMIN_ONLY: RoleGate = RoleGate::new(&[Role::Admin]);
pub const ORGANIZER_OR_ADMIN: RoleGate = RoleGate::new(&[Role::Organizer, Role::Admin]);

impl RoleGate {
    pub const fn new(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    pub fn admit(&self, principal: &Principal) -> Result<()> {
        if self.allowed.contains(&principal.role) {
            Ok(())
        } else {
            tracing::info!(
                principal = %principal.id,
                role = %principal.role,
                "access denied by role gate"
            );
            Err(Error::Forbidden(NO_PERMISSION.to_string()))
        }
    }
}

/// Must be layered inside [`authenticate`].
pub async fn restrict_to(State(gate): State<RoleGate>, req: Request, next: Next) -> Result<Response> {
    let principal = *req
        .extensions()
        .get::<Principal>()
        .ok_or_else(|| Error::Unauthorized(NOT_LOGGED_IN.to_string()))?;
    gate.admit(&principal)?;
    Ok(next.run(req).await)
}

/// Rejects an operation whose target is the acting principal. Callers run it
/// before looking the target up, so a self-reference is forbidden even when
/// the id does not exist.
pub fn deny_if_self(principal: &Principal, target_id: Uuid, message: &str) -> Result<()> {
    if principal.id == target_id {
        return Err(Error::Forbidden(message.to_string()));
    }
    Ok(())
}
