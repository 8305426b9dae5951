use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::config::BootstrapAdmin;
use crate::database::user_store::{UserInsert, UserStore};
use crate::error::{Error, Result};
use crate::middleware::auth::{deny_if_self, Principal};
use crate::models::user::{NewUser, Role, User};
use crate::utils::crypto::hash_password;

pub const INVALID_ROLE: &str = "Invalid role specified";
pub const USER_NOT_FOUND: &str = "No user found with that ID";
pub const SELF_ROLE_CHANGE: &str = "Admin cannot change their own role";
pub const SELF_DELETE: &str = "Admin cannot delete their own account";

/// The user directory. Callers are expected to have passed the admin role
/// gate; this layer enforces the data invariants.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn resolve_principal(&self, id: Uuid) -> Result<Principal> {
        let user = self.store.find_by_id(id).await?.ok_or_else(|| {
            Error::Unauthorized("The user belonging to this token no longer exists.".to_string())
        })?;
        Ok(Principal {
            id: user.id,
            role: user.role,
        })
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.store.list().await
    }

    /// Checks run in a fixed order: role value, self-reference, existence.
    pub async fn update_role(&self, principal: &Principal, target_id: Uuid, role: &str) -> Result<User> {
        let role: Role = role
            .parse()
            .map_err(|_| Error::BadRequest(INVALID_ROLE.to_string()))?;
        deny_if_self(principal, target_id, SELF_ROLE_CHANGE)?;

        let user = self
            .store
            .set_role(target_id, role)
            .await?
            .ok_or_else(|| Error::NotFound(USER_NOT_FOUND.to_string()))?;

        tracing::info!(actor = %principal.id, target = %target_id, role = %role, "user role updated");
        Ok(user)
    }

    pub async fn delete(&self, principal: &Principal, target_id: Uuid) -> Result<()> {
        deny_if_self(principal, target_id, SELF_DELETE)?;

        if !self.store.delete(target_id).await? {
            return Err(Error::NotFound(USER_NOT_FOUND.to_string()));
        }

        tracing::info!(actor = %principal.id, target = %target_id, "user deleted");
        Ok(())
    }

    /// Creates the configured admin unless a user with that email already
    /// exists. Returns the created entry, or `None` when nothing was done.
    pub async fn ensure_admin(&self, admin: &BootstrapAdmin) -> Result<Option<User>> {
        let new_user = NewUser {
            name: admin.name.clone(),
            email: admin.email.trim().to_lowercase(),
            password: admin.password.clone(),
            role: Role::Admin,
        };
        new_user.validate()?;

        if let Some(existing) = self.store.find_by_email(&new_user.email).await? {
            tracing::info!(user = %existing.id, "bootstrap admin already present");
            return Ok(None);
        }

        let password_hash = hash_password(&new_user.password)?;
        let created = self
            .store
            .insert(UserInsert {
                name: new_user.name,
                email: new_user.email,
                role: new_user.role,
                password_hash,
            })
            .await?;
        tracing::info!(user = %created.id, email = %created.email, "bootstrap admin created");
        Ok(Some(created))
    }
}
